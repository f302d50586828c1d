//! Justified-line layout.
//!
//! The line is split on single spaces. The room left over in the target
//! width is shared out evenly: every gap gets the same whole number of
//! character advances plus the same rounded number of microsteps for the
//! fractional part. This is a proportional model; it does not distribute
//! the rounding error across gaps the way an optimal-fit justifier would.

use erika_ddrscii::{ErrorPolicy, character_length};

use crate::error::{ProtocolError, ProtocolResult};
use crate::motion::{Direction, full_steps, horizontal_microsteps};
use crate::opcodes::MICROSTEPS_PER_CHARACTER;
use crate::print::{LineEnding, encode_character_run};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOp {
    /// Print a word.
    Word(String),
    /// Move right by whole character widths.
    AdvanceCharacters(u32),
    /// Move right by microsteps.
    AdvanceMicrosteps(i32),
}

/// Lay out `text` so that it spans `target_width` characters.
///
/// Lines with fewer than two words come back unchanged as a single word.
///
/// # Errors
///
/// `OutOfRangeParameter` when the words alone do not fit in `target_width`,
/// which would need a negative gap.
pub fn layout_justified_line(text: &str, target_width: u32) -> ProtocolResult<Vec<LayoutOp>> {
    let words: Vec<&str> = text.split(' ').collect();
    let gaps = i64::try_from(words.len().saturating_sub(1)).unwrap_or(i64::MAX);
    if gaps == 0 {
        return Ok(vec![LayoutOp::Word(text.to_owned())]);
    }

    let length = i64::try_from(character_length(text)).unwrap_or(i64::MAX);
    let total_space = i64::from(target_width) - length + gaps;
    if total_space < 0 {
        return Err(ProtocolError::out_of_range(
            "target width",
            i64::from(target_width),
            length - gaps,
            i64::from(u32::MAX),
        ));
    }

    // floor(total / gaps) whole characters; the fraction in microsteps,
    // rounded half up.
    let whole = total_space / gaps;
    let remainder = total_space % gaps;
    let micro_per_char = i64::from(MICROSTEPS_PER_CHARACTER);
    let microsteps = (2 * remainder * micro_per_char + gaps) / (2 * gaps);

    let whole = u32::try_from(whole).map_err(|e| {
        ProtocolError::InvalidConfiguration(format!("gap of {whole} characters: {e}"))
    })?;
    let microsteps = i32::try_from(microsteps).unwrap_or_default();

    let mut ops = Vec::with_capacity(words.len() * 3);
    let mut words = words.into_iter().peekable();
    while let Some(word) = words.next() {
        ops.push(LayoutOp::Word(word.to_owned()));
        if words.peek().is_none() {
            break;
        }
        if whole > 0 {
            ops.push(LayoutOp::AdvanceCharacters(whole));
        }
        if microsteps > 0 {
            ops.push(LayoutOp::AdvanceMicrosteps(microsteps));
        }
    }
    Ok(ops)
}

/// Lower layout operations to device bytes.
///
/// One character advance is one full step to the right.
///
/// # Errors
///
/// Codec errors for words that cannot be printed under `policy`.
pub fn encode_layout(
    ops: &[LayoutOp],
    line_ending: LineEnding,
    policy: ErrorPolicy,
) -> ProtocolResult<Vec<u8>> {
    let mut out = Vec::new();
    for op in ops {
        match op {
            LayoutOp::Word(word) => {
                let (bytes, _) = encode_character_run(word, line_ending, policy)?;
                out.extend_from_slice(&bytes);
            }
            LayoutOp::AdvanceCharacters(n) => out.extend(full_steps(Direction::Right, *n)),
            LayoutOp::AdvanceMicrosteps(n) => out.extend(horizontal_microsteps(*n)),
        }
    }
    Ok(out)
}
