//! Fuzzes DDRSCII decoding of keyboard bytes.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_ddrscii_decode
#![no_main]
use erika_ddrscii::{ErrorPolicy, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Ignore never fails and yields one character per byte.
    if let Ok((text, consumed)) = decode(data, ErrorPolicy::Ignore) {
        assert_eq!(consumed, data.len());
        assert_eq!(text.chars().count(), data.len());
    } else {
        panic!("ignore policy must not fail");
    }
    let _ = decode(data, ErrorPolicy::Strict);
});
