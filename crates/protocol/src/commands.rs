//! Device configuration commands.
//!
//! Every command is one opcode, optionally followed by one parameter byte.
//! Parameters are range-checked before anything is encoded; nothing is
//! clamped or truncated.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProtocolError, ProtocolResult};
use crate::opcodes;

/// Longest alarm the machine accepts.
pub const MAX_ALARM: Duration = Duration::from_millis(5100);
/// Alarm duration resolution.
pub const ALARM_UNIT: Duration = Duration::from_millis(20);
/// Petals on the typewheel.
pub const TYPEWHEEL_PETALS: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSpacing {
    #[default]
    Single,
    OneAndHalf,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterPitch {
    #[default]
    Ten,
    Twelve,
    Fifteen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    SetLeftMargin,
    SetRightMargin,
    ReleaseMargins,
    SetTab,
    ClearTab,
    ClearAllTabs,
    LineSpacing(LineSpacing),
    CharacterPitch(CharacterPitch),
    CorrectionOn,
    CorrectionOff,
    ReversePrintingOn,
    ReversePrintingOff,
    KeyboardCodesOn,
    KeyboardCodesOff,
    AutorepeatOn,
    AutorepeatOff,
    /// Switch the machine's line speed, in baud.
    BaudRate(u32),
    /// Print hammer velocity, 0..=255.
    Velocity(u16),
    /// Ribbon advance steps, 0..=255.
    RibbonAdvance(u16),
    /// Typewheel petal index, 0..=99.
    TypewheelRotation(u16),
    /// Alarm duration, at most 5.1 s. The machine counts in 20 ms units;
    /// anything finer is rounded down to a whole unit.
    Alarm(Duration),
}

fn param_byte(name: &'static str, value: u16, max: u8) -> ProtocolResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|byte| *byte <= max)
        .ok_or_else(|| ProtocolError::out_of_range(name, i64::from(value), 0, i64::from(max)))
}

fn baud_selector(baud: u32) -> ProtocolResult<u8> {
    opcodes::BAUD_SELECTORS
        .iter()
        .find(|(rate, _)| *rate == baud)
        .map(|(_, selector)| *selector)
        .ok_or_else(|| ProtocolError::InvalidConfiguration(format!("unsupported baud rate {baud}")))
}

fn alarm_units(duration: Duration) -> ProtocolResult<u8> {
    let out_of_range = || {
        ProtocolError::out_of_range(
            "alarm duration (ms)",
            i64::try_from(duration.as_millis()).unwrap_or(i64::MAX),
            0,
            i64::try_from(MAX_ALARM.as_millis()).unwrap_or(i64::MAX),
        )
    };
    if duration > MAX_ALARM {
        return Err(out_of_range());
    }
    let millis = duration.as_millis();
    let unit = ALARM_UNIT.as_millis();
    if !millis.is_multiple_of(unit) || !duration.subsec_nanos().is_multiple_of(1_000_000) {
        debug!(
            "Alarm of {duration:?} rounded down to {} ms",
            millis / unit * unit
        );
    }
    u8::try_from(millis / unit).ok().ok_or_else(out_of_range)
}

impl DeviceCommand {
    /// Encode the command, validating its parameter first.
    ///
    /// # Errors
    ///
    /// `OutOfRangeParameter` for a parameter outside its bound,
    /// `InvalidConfiguration` for a baud rate the machine cannot switch to.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let bytes = match *self {
            Self::SetLeftMargin => vec![opcodes::SET_LEFT_MARGIN],
            Self::SetRightMargin => vec![opcodes::SET_RIGHT_MARGIN],
            Self::ReleaseMargins => vec![opcodes::RELEASE_MARGINS],
            Self::SetTab => vec![opcodes::SET_TAB],
            Self::ClearTab => vec![opcodes::CLEAR_TAB],
            Self::ClearAllTabs => vec![opcodes::CLEAR_ALL_TABS],
            Self::LineSpacing(spacing) => vec![match spacing {
                LineSpacing::Single => opcodes::LINE_SPACING_SINGLE,
                LineSpacing::OneAndHalf => opcodes::LINE_SPACING_ONE_AND_HALF,
                LineSpacing::Double => opcodes::LINE_SPACING_DOUBLE,
            }],
            Self::CharacterPitch(pitch) => vec![match pitch {
                CharacterPitch::Ten => opcodes::PITCH_10_CPI,
                CharacterPitch::Twelve => opcodes::PITCH_12_CPI,
                CharacterPitch::Fifteen => opcodes::PITCH_15_CPI,
            }],
            Self::CorrectionOn => vec![opcodes::CORRECTION_ON],
            Self::CorrectionOff => vec![opcodes::CORRECTION_OFF],
            Self::ReversePrintingOn => vec![opcodes::REVERSE_PRINTING_ON],
            Self::ReversePrintingOff => vec![opcodes::REVERSE_PRINTING_OFF],
            Self::KeyboardCodesOn => vec![opcodes::KEYBOARD_CODES_ON],
            Self::KeyboardCodesOff => vec![opcodes::KEYBOARD_CODES_OFF],
            Self::AutorepeatOn => vec![opcodes::AUTOREPEAT_ON],
            Self::AutorepeatOff => vec![opcodes::AUTOREPEAT_OFF],
            Self::BaudRate(baud) => vec![opcodes::BAUD_RATE, baud_selector(baud)?],
            Self::Velocity(v) => vec![opcodes::VELOCITY, param_byte("velocity", v, 255)?],
            Self::RibbonAdvance(n) => {
                vec![opcodes::RIBBON_ADVANCE, param_byte("ribbon advance", n, 255)?]
            }
            Self::TypewheelRotation(n) => vec![
                opcodes::TYPEWHEEL_ROTATION,
                param_byte("typewheel rotation", n, TYPEWHEEL_PETALS - 1)?,
            ],
            Self::Alarm(duration) => vec![opcodes::ALARM, alarm_units(duration)?],
        };
        Ok(bytes)
    }
}

/// The two print-mode flip states.
///
/// Each mode has exactly two states and one opcode per transition; the
/// default for both is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintModes {
    pub reverse_printing: bool,
    pub correction: bool,
}

impl PrintModes {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Record the effect of a command that reached the machine.
    pub fn apply(&mut self, command: DeviceCommand) {
        let before = *self;
        match command {
            DeviceCommand::ReversePrintingOn => self.reverse_printing = true,
            DeviceCommand::ReversePrintingOff => self.reverse_printing = false,
            DeviceCommand::CorrectionOn => self.correction = true,
            DeviceCommand::CorrectionOff => self.correction = false,
            _ => return,
        }
        if before != *self {
            debug!("Print modes {:?} -> {:?}", before, self);
        }
    }

    /// Commands that return every active mode to its default, reverse
    /// printing first.
    pub fn unwind_commands(&self) -> Vec<DeviceCommand> {
        let mut commands = Vec::with_capacity(2);
        if self.reverse_printing {
            commands.push(DeviceCommand::ReversePrintingOff);
        }
        if self.correction {
            commands.push(DeviceCommand::CorrectionOff);
        }
        commands
    }
}
