//! Erika 3004 command opcodes.
//!
//! Character codes live below 0x80 (see `erika_ddrscii::table`); everything
//! here is a carriage, paper, or configuration command.

/// Half-step carriage right.
pub const HALF_STEP_RIGHT: u8 = 0x73;
/// Half-step carriage left.
pub const HALF_STEP_LEFT: u8 = 0x74;
/// Half-step paper feed (cursor down).
pub const HALF_STEP_DOWN: u8 = 0x75;
/// Half-step paper reverse (cursor up).
pub const HALF_STEP_UP: u8 = 0x76;

/// One microstep paper feed.
pub const MICROSTEP_DOWN: u8 = 0x81;
/// One microstep paper reverse.
pub const MICROSTEP_UP: u8 = 0x82;
/// Horizontal microsteps; followed by a two's-complement count.
pub const MICROSTEP_HORIZONTAL: u8 = 0xA5;

pub const SET_TAB: u8 = 0x7A;
pub const CLEAR_TAB: u8 = 0x7B;
pub const CLEAR_ALL_TABS: u8 = 0x7C;
pub const RELEASE_MARGINS: u8 = 0x7D;
pub const SET_LEFT_MARGIN: u8 = 0x7E;
pub const SET_RIGHT_MARGIN: u8 = 0x7F;

pub const LINE_SPACING_SINGLE: u8 = 0x84;
pub const LINE_SPACING_ONE_AND_HALF: u8 = 0x85;
pub const LINE_SPACING_DOUBLE: u8 = 0x86;

pub const PITCH_10_CPI: u8 = 0x87;
pub const PITCH_12_CPI: u8 = 0x88;
pub const PITCH_15_CPI: u8 = 0x89;

pub const CORRECTION_ON: u8 = 0x8C;
pub const CORRECTION_OFF: u8 = 0x8D;
pub const REVERSE_PRINTING_ON: u8 = 0x8E;
pub const REVERSE_PRINTING_OFF: u8 = 0x8F;

pub const KEYBOARD_CODES_ON: u8 = 0x90;
pub const KEYBOARD_CODES_OFF: u8 = 0x91;
pub const AUTOREPEAT_ON: u8 = 0x9A;
pub const AUTOREPEAT_OFF: u8 = 0x9B;

/// Baud-rate switch; followed by a selector byte.
pub const BAUD_RATE: u8 = 0xA0;
/// Print hammer velocity; followed by 0..=255.
pub const VELOCITY: u8 = 0xA1;
/// Ribbon advance; followed by a step count.
pub const RIBBON_ADVANCE: u8 = 0xA2;
/// Typewheel rotation; followed by a petal index.
pub const TYPEWHEEL_ROTATION: u8 = 0xA3;
/// Alarm; followed by a duration in 20 ms units.
pub const ALARM: u8 = 0xAA;

/// Baud rates the machine can switch to, with their selector bytes.
pub const BAUD_SELECTORS: [(u32, u8); 5] = [
    (1200, 0x10),
    (2400, 0x08),
    (4800, 0x04),
    (9600, 0x02),
    (19200, 0x01),
];

/// Microsteps in one character advance at 10 cpi.
pub const MICROSTEPS_PER_CHARACTER: u32 = 10;
