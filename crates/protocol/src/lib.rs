//! Command encoding for the Erika 3004 electronic typewriter.
//!
//! This crate turns intent (print this text, move the carriage, switch the
//! line spacing) into the raw bytes the machine understands. It performs
//! no I/O; the `erika-device` crate writes the bytes to a serial line.
//!
//! # Key Features
//! - Relative motion: half steps, microsteps, and split horizontal moves
//! - Range-checked device configuration commands
//! - Print-mode bookkeeping for reverse printing and correction
//! - Line-ending and overstrike handling on top of the DDRSCII codec
//! - Justified-line layout with microstep gap filling

#![deny(static_mut_refs)]

pub mod commands;
pub mod error;
pub mod layout;
pub mod motion;
pub mod opcodes;
pub mod print;

pub use commands::{
    ALARM_UNIT, CharacterPitch, DeviceCommand, LineSpacing, MAX_ALARM, PrintModes,
    TYPEWHEEL_PETALS,
};
pub use error::{ProtocolError, ProtocolResult};
pub use layout::{LayoutOp, encode_layout, layout_justified_line};
pub use motion::{
    Direction, HORIZONTAL_MICROSTEP_LEN, PULSES_PER_FULL_STEP, VerticalDirection, full_steps,
    horizontal_microstep, horizontal_microsteps, split_microsteps, vertical_microsteps,
};
pub use print::{LineEnding, encode_character_run, overprint_pair};
