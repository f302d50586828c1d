//! DDRSCII text codec for the Erika 3004 electronic typewriter.
//!
//! This crate is intentionally I/O-free. It maps Unicode text onto the
//! typewheel codes of the Erika and back, and can be tested and fuzzed
//! without a serial line or a machine attached.
//!
//! # Key Features
//! - NFC normalization before lookup
//! - Composition of accented letters the typewheel lacks, by striking the
//!   diacritic first and the base letter on the same position
//! - `strict` / `ignore` error policies
//! - Byte-wise decoding of keyboard input

#![deny(static_mut_refs)]

pub mod codec;
pub mod error;
pub mod grapheme;
pub mod table;

pub use codec::{
    CODEC_NAME, Ddrscii, ErrorPolicy, character_length, decode, decode_byte, encode,
    encode_char, lookup_codec,
};
pub use error::{CodecError, CodecResult};
pub use grapheme::{Grapheme, Graphemes, next_grapheme};
pub use table::{
    BACKSPACE, CARRIAGE_RETURN, CodeTable, CombiningMarkTable, NEWLINE, SPACE, TAB,
};
