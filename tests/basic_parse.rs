use fragbox::boxes::HEADER_LEN;
use fragbox::known_boxes::BoxType;
use fragbox::parser::{Descent, parse_box, read_box_header};
use fragbox::ParseError;

fn header(size: u32, typ: &[u8; 4]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&size.to_be_bytes());
    v.extend_from_slice(typ);
    v
}

#[test]
fn read_single_mfhd_header() {
    // mfhd: version/flags + sequence number
    let mut data = header(16, b"mfhd");
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&1u32.to_be_bytes());

    let hdr = read_box_header(&data, 0).expect("read_box_header failed");

    assert_eq!(hdr.start, 0);
    assert_eq!(hdr.size, 16);
    assert_eq!(hdr.typ, BoxType::Mfhd);
    assert_eq!(hdr.data_start(), HEADER_LEN);
    assert_eq!(hdr.end(), 16);
}

#[test]
fn header_tag_is_case_insensitive() {
    let data = header(8, b"TrUn");
    let hdr = read_box_header(&data, 0).expect("read_box_header failed");
    assert_eq!(hdr.typ, BoxType::Trun);
}

#[test]
fn header_at_offset() {
    let mut data = header(8, b"tfhd");
    data.extend(header(8, b"uuid"));

    let hdr = read_box_header(&data, 8).expect("read_box_header failed");
    assert_eq!(hdr.start, 8);
    assert_eq!(hdr.typ, BoxType::Uuid);
}

#[test]
fn truncated_header() {
    let data = [0u8, 0, 0, 8, b'm', b'o'];
    let err = read_box_header(&data, 0).unwrap_err();
    assert_eq!(err, ParseError::TruncatedHeader { offset: 0, remaining: 6 });
}

#[test]
fn unknown_tag_checked_before_size() {
    // size 0 would be invalid too, but the tag is reported first
    let data = header(0, b"ftyp");
    let err = read_box_header(&data, 0).unwrap_err();
    assert!(matches!(err, ParseError::UnknownBoxType { offset: 0, ref tag } if tag == "ftyp"));
}

#[test]
fn size_below_header_is_invalid() {
    let data = header(4, b"mdat");
    let err = read_box_header(&data, 0).unwrap_err();
    assert_eq!(err, ParseError::InvalidSize { offset: 0, size: 4, remaining: 8 });
}

#[test]
fn size_past_buffer_is_invalid() {
    let data = header(24, b"mdat");
    let err = read_box_header(&data, 0).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { size: 24, remaining: 8, .. }));
}

#[test]
fn parse_box_returns_next_cursor() {
    let mut data = header(16, b"moof");
    data.extend(header(8, b"mfhd"));
    data.extend(header(8, b"tfhd"));

    let mut descent = Descent::new(64, None);
    let (node, next) = parse_box(&data, 0, 0, &mut descent).expect("parse_box failed");
    assert_eq!(next, 16);
    assert_eq!(node.end, 16);
    assert_eq!(node.children.len(), 1);
    assert!(node.children[0].nested);
    assert!(!node.nested);

    let (sibling, next) = parse_box(&data, next, 0, &mut descent).expect("parse_box failed");
    assert_eq!(sibling.typ, BoxType::Tfhd);
    assert_eq!(next, data.len());
}

#[test]
fn uuid_extended_type_is_hex() {
    let mut data = header(24, b"uuid");
    data.extend_from_slice(&[0xa2, 0x39, 0x4f, 0x52, 0x5a, 0x9b, 0x4f, 0x14,
                             0xa2, 0x44, 0x6c, 0x42, 0x7c, 0x64, 0x8d, 0xf4]);

    let mut descent = Descent::new(64, None);
    let (node, _) = parse_box(&data, 0, 0, &mut descent).expect("parse_box failed");
    assert_eq!(node.extended_type.as_deref(), Some("a2394f525a9b4f14a2446c427c648df4"));

    let short = header(8, b"uuid");
    let (node, _) = parse_box(&short, 0, 0, &mut descent).expect("parse_box failed");
    assert!(node.extended_type.is_none());
}
