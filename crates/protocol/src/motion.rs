//! Relative carriage and paper motion.
//!
//! Nothing here tracks an absolute position; every command is relative and
//! the machine applies it against its own physical state.
//!
//! - Full steps are sent as two half-step pulses of the direction opcode.
//! - Vertical microsteps are one opcode byte each.
//! - Horizontal microsteps are `MICROSTEP_HORIZONTAL` followed by a signed
//!   byte, so one command covers -128..=127 and larger moves are split.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolResult, check_range};
use crate::opcodes::{
    HALF_STEP_DOWN, HALF_STEP_LEFT, HALF_STEP_RIGHT, HALF_STEP_UP, MICROSTEP_DOWN,
    MICROSTEP_HORIZONTAL, MICROSTEP_UP,
};

/// Half-step pulses per visible full step.
pub const PULSES_PER_FULL_STEP: usize = 2;

/// Length of one horizontal microstep command.
pub const HORIZONTAL_MICROSTEP_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn half_step_opcode(self) -> u8 {
        match self {
            Self::Left => HALF_STEP_LEFT,
            Self::Right => HALF_STEP_RIGHT,
            Self::Up => HALF_STEP_UP,
            Self::Down => HALF_STEP_DOWN,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    Up,
    Down,
}

impl VerticalDirection {
    pub fn microstep_opcode(self) -> u8 {
        match self {
            Self::Up => MICROSTEP_UP,
            Self::Down => MICROSTEP_DOWN,
        }
    }
}

/// Bytes for `count` full steps in `direction`.
pub fn full_steps(direction: Direction, count: u32) -> Vec<u8> {
    let pulses = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .saturating_mul(PULSES_PER_FULL_STEP);
    vec![direction.half_step_opcode(); pulses]
}

/// Bytes for `count` vertical microsteps.
pub fn vertical_microsteps(direction: VerticalDirection, count: u32) -> Vec<u8> {
    let steps = usize::try_from(count).unwrap_or(usize::MAX);
    vec![direction.microstep_opcode(); steps]
}

/// A single horizontal microstep command; positive moves right.
///
/// # Errors
///
/// `OutOfRangeParameter` if `count` does not fit a signed byte.
pub fn horizontal_microstep(count: i32) -> ProtocolResult<[u8; HORIZONTAL_MICROSTEP_LEN]> {
    check_range(
        "horizontal microsteps",
        i64::from(count),
        i64::from(i8::MIN),
        i64::from(i8::MAX),
    )?;
    let magnitude = i8::try_from(count).unwrap_or_default();
    Ok(horizontal_microstep_byte(magnitude))
}

fn horizontal_microstep_byte(magnitude: i8) -> [u8; HORIZONTAL_MICROSTEP_LEN] {
    let [byte] = magnitude.to_le_bytes();
    [MICROSTEP_HORIZONTAL, byte]
}

/// Split a displacement into in-range signed magnitudes.
///
/// Full-size commands (127 right, -128 left) come first, then the
/// remainder. The magnitudes sum to `displacement`; zero yields nothing.
pub fn split_microsteps(displacement: i32) -> Vec<i8> {
    let max = i64::from(i8::MAX);
    let min = i64::from(i8::MIN);
    let mut remaining = i64::from(displacement);
    let mut steps = Vec::new();

    while remaining > max {
        steps.push(i8::MAX);
        remaining -= max;
    }
    while remaining < min {
        steps.push(i8::MIN);
        remaining -= min;
    }
    if let Ok(rest) = i8::try_from(remaining)
        && rest != 0
    {
        steps.push(rest);
    }
    steps
}

/// Bytes for an arbitrary horizontal microstep displacement.
pub fn horizontal_microsteps(displacement: i32) -> Vec<u8> {
    split_microsteps(displacement)
        .into_iter()
        .flat_map(horizontal_microstep_byte)
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(500))]

        #[test]
        fn prop_split_preserves_displacement(displacement in -100_000i32..=100_000i32) {
            let steps = split_microsteps(displacement);
            let total: i64 = steps.iter().map(|s| i64::from(*s)).sum();
            prop_assert_eq!(total, i64::from(displacement));
        }

        #[test]
        fn prop_split_uses_full_commands_before_remainder(displacement in -100_000i32..=100_000i32) {
            let steps = split_microsteps(displacement);
            if let Some((_, leading)) = steps.split_last() {
                for step in leading {
                    prop_assert!(*step == i8::MAX || *step == i8::MIN);
                }
            }
            prop_assert!(steps.iter().all(|s| *s != 0));
            prop_assert!(steps.iter().all(|s| (*s > 0) == (displacement > 0)));
        }

        #[test]
        fn prop_in_range_is_single_command(count in -128i32..=127i32) {
            let single = horizontal_microstep(count)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            if count == 0 {
                prop_assert!(horizontal_microsteps(count).is_empty());
            } else {
                prop_assert_eq!(horizontal_microsteps(count), single.to_vec());
            }
        }
    }
}
