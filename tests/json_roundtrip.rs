use fragbox::{BoxReader, ReaderConfig, analyze};
use serde_json::{self, Value};

/// Build a minimal fragment in memory:
/// [moof [mfhd]] [mdat "<tt>hi</tt>"]
fn make_minimal_fragment() -> Vec<u8> {
    let mut data = Vec::new();

    // moof: size=24, one mfhd child of 16 bytes
    data.extend_from_slice(&24u32.to_be_bytes());
    data.extend_from_slice(b"moof");
    data.extend_from_slice(&16u32.to_be_bytes());
    data.extend_from_slice(b"mfhd");
    data.extend_from_slice(&[0u8; 4]); // version + flags
    data.extend_from_slice(&1u32.to_be_bytes()); // sequence number

    // mdat: text body
    let body = b"<tt>hi</tt>";
    data.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(body);

    data
}

#[test]
fn analyze_and_serialize_to_json() {
    let data = make_minimal_fragment();

    let analysis = analyze(&data, ReaderConfig::default()).expect("analyze failed");

    assert_eq!(analysis.boxes.len(), 2);
    assert_eq!(analysis.payload_text.as_deref(), Some("<tt>hi</tt>"));

    let json_str = serde_json::to_string(&analysis).expect("serialize to JSON failed");
    let v: Value = serde_json::from_str(&json_str).expect("parse JSON failed");

    let boxes = v["boxes"].as_array().expect("boxes is not an array");
    let moof = &boxes[0];
    assert_eq!(moof["type"], "moof");
    assert_eq!(moof["offset"], 0);
    assert_eq!(moof["size"], 24);
    assert_eq!(moof["end"], 24);
    assert_eq!(moof["nested"], false);
    assert_eq!(moof["children"][0]["type"], "mfhd");
    assert_eq!(moof["children"][0]["nested"], true);
    // only mdat carries a payload field
    assert!(moof.get("payload").is_none());

    let mdat = &boxes[1];
    assert_eq!(mdat["type"], "mdat");
    assert_eq!(mdat["payload"], "<tt>hi</tt>");
    assert_eq!(v["payload_text"], "<tt>hi</tt>");
    assert_eq!(v["warnings"], Value::Array(vec![]));
}

#[test]
fn report_serializes_warnings() {
    let mut data = Vec::new();
    data.extend_from_slice(&10u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0xc3, 0x28]);

    let mut reader = BoxReader::load(&data);
    reader.parse().expect("parse failed");

    let v = serde_json::to_value(reader.report()).expect("serialize to JSON failed");
    assert_eq!(v["warnings"][0]["kind"], "payload_decode");
    assert_eq!(v["warnings"][0]["offset"], 0);
    assert_eq!(v["warnings"][0]["valid_up_to"], 0);
}

#[test]
fn analyze_propagates_parse_errors() {
    let mut data = Vec::new();
    data.extend_from_slice(&8u32.to_be_bytes());
    data.extend_from_slice(b"ftyp");

    let err = analyze(&data, ReaderConfig::default()).unwrap_err();
    let parse_err = err.downcast_ref::<fragbox::ParseError>().expect("not a ParseError");
    assert!(matches!(parse_err, fragbox::ParseError::UnknownBoxType { .. }));
}

#[test]
fn config_from_json_fills_defaults() {
    let cfg = ReaderConfig::from_json(r#"{"max_depth": 4}"#).expect("bad config");
    assert_eq!(cfg.max_depth, 4);
    assert!(!cfg.log);
    assert_eq!(cfg.max_input_len, None);

    let cfg = ReaderConfig::from_json("{}").expect("bad config");
    assert_eq!(cfg, ReaderConfig::default());
}
