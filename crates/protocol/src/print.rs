//! Character-run encoding with the typewriter's presentation overrides.
//!
//! Printing goes through the DDRSCII codec, except for:
//! - newline, which becomes the configured line-ending command;
//! - glyphs missing from the typewheel that are built by overstriking two
//!   characters on one position.

use erika_ddrscii::{
    BACKSPACE, CodecError, CombiningMarkTable, ErrorPolicy, Grapheme, Graphemes, NEWLINE, SPACE,
    encode_char,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::error::ProtocolResult;
use crate::opcodes::HALF_STEP_DOWN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n` returns the carriage and feeds one line.
    #[default]
    Unix,
    /// `\n` only feeds one line; `\r` returns the carriage on its own.
    Other,
}

impl LineEnding {
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Self::Unix => &[NEWLINE],
            Self::Other => &[HALF_STEP_DOWN, HALF_STEP_DOWN],
        }
    }
}

/// The two characters struck on one position for a glyph the typewheel lacks.
pub fn overprint_pair(c: char) -> Option<(char, char)> {
    match c {
        '€' => Some(('C', '=')),
        '@' => Some(('a', 'O')),
        _ => None,
    }
}

/// Strike an overprinted glyph together with any diacritics that follow it
/// in the same grapheme. Marks go first, as for every other letter.
fn encode_overprint(
    grapheme: Grapheme<'_>,
    glyph: char,
    (first, second): (char, char),
    policy: ErrorPolicy,
    out: &mut Vec<u8>,
) -> ProtocolResult<()> {
    let mut strikes = Vec::new();
    for mark in grapheme.as_str().chars().skip(1) {
        match CombiningMarkTable.get(mark) {
            Some(byte) => strikes.push(byte),
            None if policy == ErrorPolicy::Ignore => {
                warn!("Substituting space for {:?}: unsupported mark", grapheme.as_str());
                out.push(SPACE);
                return Ok(());
            }
            None => {
                return Err(CodecError::UnsupportedCombiningMark { mark, base: glyph }.into());
            }
        }
    }
    out.extend_from_slice(&strikes);
    out.extend_from_slice(encode_char(first)?);
    out.push(BACKSPACE);
    out.extend_from_slice(encode_char(second)?);
    Ok(())
}

fn flush_run(run: &mut String, policy: ErrorPolicy, out: &mut Vec<u8>) -> ProtocolResult<()> {
    if !run.is_empty() {
        let (bytes, _) = erika_ddrscii::encode(run, policy)?;
        out.extend_from_slice(&bytes);
        run.clear();
    }
    Ok(())
}

/// Encode `text` for printing.
///
/// The text is normalized and split into graphemes once, so diacritics
/// stay with the letter they follow even when that letter is overprinted.
/// Returns the bytes and the number of input characters consumed.
///
/// # Errors
///
/// Codec errors for unmappable text under [`ErrorPolicy::Strict`].
pub fn encode_character_run(
    text: &str,
    line_ending: LineEnding,
    policy: ErrorPolicy,
) -> ProtocolResult<(Vec<u8>, usize)> {
    let normalized: String = text.nfc().collect();
    let mut out = Vec::with_capacity(normalized.len());
    let mut run = String::new();

    for grapheme in Graphemes::new(&normalized) {
        let mut chars = grapheme.as_str().chars();
        let Some(lead) = chars.next() else {
            continue;
        };
        if lead == '\n' {
            flush_run(&mut run, policy, &mut out)?;
            out.extend_from_slice(line_ending.bytes());
            // Marks after a line break strike on their own at the new line.
            run.extend(chars);
        } else if let Some(pair) = overprint_pair(lead) {
            flush_run(&mut run, policy, &mut out)?;
            encode_overprint(grapheme, lead, pair, policy, &mut out)?;
        } else {
            run.push_str(grapheme.as_str());
        }
    }
    flush_run(&mut run, policy, &mut out)?;

    Ok((out, erika_ddrscii::character_length(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    fn run(text: &str, ending: LineEnding) -> ProtocolResult<Vec<u8>> {
        encode_character_run(text, ending, ErrorPolicy::Strict).map(|(bytes, _)| bytes)
    }

    #[test]
    fn test_plain_text_matches_codec() -> ProtocolResult<()> {
        let (expected, _) = erika_ddrscii::encode("Hallo Welt", ErrorPolicy::Strict)?;
        assert_eq!(run("Hallo Welt", LineEnding::Unix)?, expected);
        Ok(())
    }

    #[test]
    fn test_unix_newline() -> ProtocolResult<()> {
        assert_eq!(run("a\nb", LineEnding::Unix)?, vec![0x61, 0x77, 0x4E]);
        Ok(())
    }

    #[test]
    fn test_other_newline_feeds_only() -> ProtocolResult<()> {
        assert_eq!(
            run("a\r\nb", LineEnding::Other)?,
            vec![0x61, 0x78, 0x75, 0x75, 0x4E]
        );
        Ok(())
    }

    #[test]
    fn test_overprint_glyphs() -> ProtocolResult<()> {
        assert_eq!(run("€", LineEnding::Unix)?, vec![0x20, BACKSPACE, 0x2E]);
        assert_eq!(run("@", LineEnding::Unix)?, vec![0x61, BACKSPACE, 0x1E]);
        Ok(())
    }

    #[test]
    fn test_overprint_counts_as_one_character() -> ProtocolResult<()> {
        let (bytes, consumed) = encode_character_run("5€", LineEnding::Unix, ErrorPolicy::Strict)?;
        assert_eq!(bytes.len(), 4);
        assert_eq!(consumed, 2);
        Ok(())
    }

    #[test]
    fn test_strict_propagates_codec_error() {
        assert_eq!(
            run("a~", LineEnding::Unix),
            Err(ProtocolError::Codec(CodecError::UnsupportedCharacter('~')))
        );
    }

    #[test]
    fn test_ignore_substitutes() -> ProtocolResult<()> {
        let (bytes, _) = encode_character_run("~@", LineEnding::Unix, ErrorPolicy::Ignore)?;
        assert_eq!(bytes, vec![SPACE, 0x61, BACKSPACE, 0x1E]);
        Ok(())
    }

    #[test]
    fn test_mark_after_overprint_stays_on_its_position() -> ProtocolResult<()> {
        // acute first, then a + BS + O, all on one position
        assert_eq!(
            run("@\u{301}b", LineEnding::Unix)?,
            vec![0x29, 0x61, BACKSPACE, 0x1E, 0x4E]
        );
        let (bytes, consumed) =
            encode_character_run("€\u{308}", LineEnding::Unix, ErrorPolicy::Strict)?;
        assert_eq!(bytes, vec![0x03, 0x20, BACKSPACE, 0x2E]);
        assert_eq!(consumed, 2);
        Ok(())
    }

    #[test]
    fn test_unsupported_mark_on_overprint() -> ProtocolResult<()> {
        assert_eq!(
            run("@\u{303}", LineEnding::Unix),
            Err(ProtocolError::Codec(CodecError::UnsupportedCombiningMark {
                mark: '\u{303}',
                base: '@',
            }))
        );
        let (bytes, _) = encode_character_run("@\u{303}a", LineEnding::Unix, ErrorPolicy::Ignore)?;
        assert_eq!(bytes, vec![SPACE, 0x61]);
        Ok(())
    }

    #[test]
    fn test_decomposed_input_matches_composed() -> ProtocolResult<()> {
        assert_eq!(run("e\u{301}\n", LineEnding::Unix)?, run("é\n", LineEnding::Unix)?);
        Ok(())
    }

    #[test]
    fn test_overprint_pairs_are_printable() {
        for c in ['€', '@'] {
            let (first, second) = overprint_pair(c).unwrap_or((c, c));
            assert!(encode_char(first).is_ok());
            assert!(encode_char(second).is_ok());
        }
        assert_eq!(overprint_pair('a'), None);
    }
}
