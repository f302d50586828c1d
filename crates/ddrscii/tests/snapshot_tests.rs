//! Snapshot tests for DDRSCII byte output.

use erika_ddrscii as ddrscii;
use insta::assert_snapshot;

fn hex(text: &str) -> String {
    match ddrscii::encode(text, ddrscii::ErrorPolicy::Strict) {
        Ok((bytes, _)) => format!("{bytes:02X?}"),
        Err(e) => format!("error: {e}"),
    }
}

#[test]
fn test_snapshot_german_sentence() {
    assert_snapshot!(hex("Größe: 5 Maß."), @"[1C, 59, 66, 47, 5A, 13, 71, 0C, 71, 16, 61, 47, 63]");
}

#[test]
fn test_snapshot_line_control() {
    assert_snapshot!(hex("a\tb\r\n"), @"[61, 79, 4E, 78, 77]");
}

#[test]
fn test_snapshot_circumflex_row() {
    assert_snapshot!(hex("âĉ"), @"[19, 61, 19, 57]");
}

#[test]
fn test_snapshot_acute_row() {
    assert_snapshot!(hex("áćé"), @"[29, 61, 29, 57, 44]");
}

#[test]
fn test_snapshot_grave_without_precomposed_form() {
    assert_snapshot!(hex("m\u{300}"), @"[2B, 4A]");
}

#[test]
fn test_snapshot_umlaut_capitals() {
    assert_snapshot!(hex("ÄËŸ"), @"[3F, 03, 34, 03, 31]");
}

#[test]
fn test_snapshot_unsupported_character() {
    assert_snapshot!(hex("~"), @"error: Unsupported character: '~'");
}

#[test]
fn test_snapshot_decode_keyboard_input() {
    let decoded = ddrscii::decode(&[0x12, 0x5A, 0x4D, 0x4D, 0x5E, 0x42], ddrscii::ErrorPolicy::Strict)
        .map(|(text, _)| text)
        .unwrap_or_else(|e| format!("error: {e}"));
    assert_snapshot!(decoded, @"Hello!");
}
