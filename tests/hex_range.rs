use fragbox::hex_range;
use fragbox::util::{hex_dump, preview};

#[test]
fn hex_range_reads_within_bounds() {
    let data = (0u8..64u8).collect::<Vec<_>>();

    let dump = hex_range(&data, 16, 16);

    assert_eq!(dump.offset, 16);
    assert_eq!(dump.length, 16);
    // first byte of region is 0x10, and the line is addressed at 0x10
    assert!(dump.hex.starts_with("00000010  10 11"));
}

#[test]
fn hex_range_clamps_to_end() {
    let data = (0u8..32u8).collect::<Vec<_>>();

    // ask past the end
    let dump = hex_range(&data, 24, 32);

    // we only have 8 bytes from 24..32
    assert_eq!(dump.offset, 24);
    assert_eq!(dump.length, 8);
}

#[test]
fn hex_range_past_end_is_empty() {
    let data = [1u8, 2, 3];
    let dump = hex_range(&data, 10, 4);
    assert_eq!(dump.length, 0);
    assert!(dump.hex.is_empty());
}

#[test]
fn hex_dump_shows_ascii_column() {
    let out = hex_dump(b"mdat\x00", 0);
    assert!(out.ends_with("|mdat.|\n"));
}

#[test]
fn preview_cuts_on_char_boundary() {
    assert_eq!(preview("<tt>", 10), "<tt>");
    assert_eq!(preview("äöüß", 2), "äö…");
}
