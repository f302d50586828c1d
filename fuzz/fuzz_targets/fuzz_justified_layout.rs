//! Fuzzes justified-line layout and its lowering to bytes.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_justified_layout
#![no_main]
use erika_ddrscii::ErrorPolicy;
use erika_protocol::{LayoutOp, LineEnding, encode_layout, layout_justified_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&width, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    if let Ok(ops) = layout_justified_line(text, u32::from(width)) {
        assert!(matches!(ops.last(), Some(LayoutOp::Word(_))));
        let _ = encode_layout(&ops, LineEnding::Unix, ErrorPolicy::Ignore);
    }
});
