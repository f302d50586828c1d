//! Layout behaviour across the public API.

use erika_ddrscii::ErrorPolicy;
use erika_protocol::{
    LayoutOp, LineEnding, ProtocolError, ProtocolResult, encode_layout, layout_justified_line,
};
use proptest::prelude::*;

#[test]
fn test_justify_keeps_word_text() -> ProtocolResult<()> {
    let ops = layout_justified_line("Grüße aus Potsdam", 30)?;
    let words: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            LayoutOp::Word(w) => Some(w.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(words, vec!["Grüße", "aus", "Potsdam"]);
    Ok(())
}

#[test]
fn test_double_space_yields_empty_word() -> ProtocolResult<()> {
    // Splitting is on single spaces, so "a  b" has an empty middle word.
    let ops = layout_justified_line("a  b", 4)?;
    assert_eq!(
        ops,
        vec![
            LayoutOp::Word("a".into()),
            LayoutOp::AdvanceCharacters(1),
            LayoutOp::Word(String::new()),
            LayoutOp::AdvanceCharacters(1),
            LayoutOp::Word("b".into()),
        ]
    );
    Ok(())
}

#[test]
fn test_unprintable_word_surfaces_codec_error() -> ProtocolResult<()> {
    let ops = layout_justified_line("a ~", 5)?;
    assert!(matches!(
        encode_layout(&ops, LineEnding::Unix, ErrorPolicy::Strict),
        Err(ProtocolError::Codec(_))
    ));
    assert!(encode_layout(&ops, LineEnding::Unix, ErrorPolicy::Ignore).is_ok());
    Ok(())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(200))]

    /// Any width at least as wide as the words is accepted.
    #[test]
    fn prop_wide_enough_is_accepted(
        words in proptest::collection::vec("[a-zäöü]{1,6}", 1..6),
        extra in 0u32..30,
    ) {
        let text = words.join(" ");
        let width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX) + extra;
        prop_assert!(layout_justified_line(&text, width).is_ok());
    }

    /// Encoded bytes are never empty for non-empty words.
    #[test]
    fn prop_encoded_layout_nonempty(words in proptest::collection::vec("[a-z]{1,6}", 1..6)) {
        let text = words.join(" ");
        let width = u32::try_from(text.len()).unwrap_or(u32::MAX) + 3;
        let ops = layout_justified_line(&text, width)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let bytes = encode_layout(&ops, LineEnding::Unix, ErrorPolicy::Strict)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(bytes.len() >= text.len());
    }
}
