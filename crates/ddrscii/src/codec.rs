//! DDRSCII encode and decode.
//!
//! Encoding works on NFC text, one grapheme at a time:
//! - a grapheme that is a single scalar present in the [`CodeTable`] emits
//!   that entry's bytes;
//! - anything else is canonically decomposed and emitted as the diacritic
//!   strikes followed by the base letter, which is the order the typist
//!   would key them on a dead-key machine.
//!
//! Decoding is byte-by-byte through the inverse table only.

use std::fmt;
use std::str::FromStr;

use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CodecError, CodecResult};
use crate::grapheme::{Grapheme, Graphemes};
use crate::table::{CodeTable, CombiningMarkTable, SPACE};

/// Name the codec is registered under.
pub const CODEC_NAME: &str = "DDRSCII";

/// What to do with a unit the tables cannot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole call on the first unmappable unit.
    #[default]
    Strict,
    /// Substitute a space and carry on.
    Ignore,
}

impl ErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "ignore" => Ok(Self::Ignore),
            other => Err(CodecError::InvalidConfiguration(format!(
                "unknown error policy '{other}' (expected 'strict' or 'ignore')"
            ))),
        }
    }
}

/// Number of input characters in `text`.
///
/// Positioning on the carriage counts input characters, never output bytes,
/// because composed letters expand to several device bytes.
pub fn character_length(text: &str) -> usize {
    text.chars().count()
}

/// Encode a single precomposed scalar.
pub fn encode_char(c: char) -> CodecResult<&'static [u8]> {
    CodeTable.get(c).ok_or(CodecError::UnsupportedCharacter(c))
}

/// Decode a single device byte.
pub fn decode_byte(byte: u8) -> CodecResult<char> {
    CodeTable.inverse(byte).ok_or(CodecError::UnknownDeviceByte(byte))
}

fn encode_grapheme(grapheme: Grapheme<'_>, out: &mut Vec<u8>) -> CodecResult<()> {
    if let Some(bytes) = grapheme.single_char().and_then(|c| CodeTable.get(c)) {
        out.extend_from_slice(bytes);
        return Ok(());
    }

    let (base, marks) = grapheme.decompose();
    let base_bytes = match base {
        Some(c) => Some(CodeTable.get(c).ok_or_else(|| {
            // Name the scalar the caller wrote, not its decomposed base.
            let written = grapheme.as_str().chars().next().unwrap_or(c);
            CodecError::UnsupportedCharacter(written)
        })?),
        None => None,
    };

    let mut strikes = Vec::with_capacity(marks.len());
    for mark in marks {
        let byte = CombiningMarkTable
            .get(mark)
            .ok_or(CodecError::UnsupportedCombiningMark {
                mark,
                base: base.unwrap_or(mark),
            })?;
        strikes.push(byte);
    }

    out.extend_from_slice(&strikes);
    if let Some(bytes) = base_bytes {
        out.extend_from_slice(bytes);
    }
    Ok(())
}

/// Encode `text` to device bytes.
///
/// Returns the bytes and the number of input characters consumed.
pub fn encode(text: &str, policy: ErrorPolicy) -> CodecResult<(Vec<u8>, usize)> {
    let normalized: String = text.nfc().collect();
    let mut out = Vec::with_capacity(normalized.len());

    for grapheme in Graphemes::new(&normalized) {
        let mark = out.len();
        match encode_grapheme(grapheme, &mut out) {
            Ok(()) => {}
            Err(e) if policy == ErrorPolicy::Ignore => {
                warn!("Substituting space for {:?}: {}", grapheme.as_str(), e);
                out.truncate(mark);
                out.push(SPACE);
            }
            Err(e) => return Err(e),
        }
    }

    Ok((out, character_length(text)))
}

/// Decode device bytes to text.
///
/// Returns the text and the number of bytes consumed.
pub fn decode(bytes: &[u8], policy: ErrorPolicy) -> CodecResult<(String, usize)> {
    let mut text = String::with_capacity(bytes.len());
    for &byte in bytes {
        match decode_byte(byte) {
            Ok(c) => text.push(c),
            Err(e) if policy == ErrorPolicy::Ignore => {
                warn!("Substituting space for {}", e);
                text.push(' ');
            }
            Err(e) => return Err(e),
        }
    }
    Ok((text, bytes.len()))
}

/// The DDRSCII codec bound to a default error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ddrscii {
    policy: ErrorPolicy,
}

impl Ddrscii {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn name(&self) -> &'static str {
        CODEC_NAME
    }

    pub fn encode(&self, text: &str) -> CodecResult<(Vec<u8>, usize)> {
        encode(text, self.policy)
    }

    pub fn decode(&self, bytes: &[u8]) -> CodecResult<(String, usize)> {
        decode(bytes, self.policy)
    }
}

/// Look up a codec by name, case-insensitively.
pub fn lookup_codec(name: &str) -> Option<Ddrscii> {
    name.eq_ignore_ascii_case(CODEC_NAME)
        .then(Ddrscii::default)
}
