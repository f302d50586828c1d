//! Fuzzes DDRSCII encoding of arbitrary text.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_ddrscii_encode
#![no_main]
use erika_ddrscii::{ErrorPolicy, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Strict may reject; ignore must always produce bytes for non-empty text.
    let _ = encode(text, ErrorPolicy::Strict);
    match encode(text, ErrorPolicy::Ignore) {
        Ok((bytes, consumed)) => {
            assert_eq!(consumed, text.chars().count());
            assert!(text.is_empty() || !bytes.is_empty());
        }
        Err(e) => panic!("ignore policy failed: {e}"),
    }
});
