//! Grapheme segmentation over NFC text.
//!
//! A grapheme starts at every scalar that is not a combining mark and
//! absorbs all combining marks that immediately follow it. This is the unit
//! the typewriter prints at one carriage position.

use std::iter::FusedIterator;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// One user-perceived character: a base scalar plus trailing combining marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grapheme<'a>(&'a str);

impl<'a> Grapheme<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The scalar when the grapheme is exactly one codepoint.
    pub fn single_char(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Canonical decomposition into a base scalar and its combining marks.
    ///
    /// The base is `None` when the grapheme consists of marks only, which
    /// happens for a mark at the very start of the input.
    pub fn decompose(&self) -> (Option<char>, Vec<char>) {
        let mut decomposed = self.0.nfd().peekable();
        let base = decomposed.next_if(|c| !is_combining_mark(*c));
        (base, decomposed.collect())
    }
}

/// Find the grapheme starting at byte offset `cursor`.
///
/// Returns the grapheme and the cursor of the next one, or `None` once the
/// cursor reaches the end of `text` (or does not sit on a char boundary).
pub fn next_grapheme(text: &str, cursor: usize) -> Option<(Grapheme<'_>, usize)> {
    let rest = text.get(cursor..)?;
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;

    let mut end = first.len_utf8();
    for (offset, c) in chars {
        if !is_combining_mark(c) {
            break;
        }
        end = offset + c.len_utf8();
    }

    let grapheme = rest.get(..end)?;
    Some((Grapheme(grapheme), cursor + end))
}

/// Cursor-driven iterator over the graphemes of a string.
#[derive(Debug, Clone)]
pub struct Graphemes<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Graphemes<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }

    /// Byte offset of the next grapheme.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for Graphemes<'a> {
    type Item = Grapheme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (grapheme, next) = next_grapheme(self.text, self.cursor)?;
        self.cursor = next;
        Some(grapheme)
    }
}

impl FusedIterator for Graphemes<'_> {}
