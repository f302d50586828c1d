//! The Erika 3004 driver.
//!
//! `Erika` owns one transport exclusively. Every public operation encodes
//! its whole request first and only then writes, so a rejected parameter
//! never leaves a partial command on the line.

use std::thread;

use erika_ddrscii::{Graphemes, decode};
use erika_protocol::{
    DeviceCommand, Direction, PrintModes, VerticalDirection, encode_character_run, encode_layout,
    full_steps, horizontal_microsteps, layout_justified_line, vertical_microsteps,
};
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::config::DeviceConfig;
use crate::error::{DeviceError, DeviceResult};
use crate::transport::{SerialTransport, Transport};

/// Dropping an open driver flushes and closes the transport without the
/// drain delay; only [`Erika::close`] and [`Erika::with_session`] wait for
/// queued characters to be printed.
pub struct Erika<T: Transport> {
    transport: T,
    config: DeviceConfig,
    modes: PrintModes,
}

impl Erika<SerialTransport> {
    /// Build a driver for the serial port named in `config`.
    ///
    /// The port is not opened until [`Erika::open`] or [`Erika::with_session`].
    pub fn connect(config: DeviceConfig) -> DeviceResult<Self> {
        config.validate()?;
        let transport = SerialTransport::new(&config);
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> Erika<T> {
    pub fn new(transport: T, config: DeviceConfig) -> Self {
        Self {
            transport,
            config,
            modes: PrintModes::default(),
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Print modes as last confirmed by a successful write.
    pub fn print_modes(&self) -> PrintModes {
        self.modes
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    pub fn open(&mut self) -> DeviceResult<()> {
        if !self.transport.is_open() {
            self.transport.open()?;
            info!("Erika session opened on {}", self.config.port);
        }
        Ok(())
    }

    /// Flush, wait for the machine to print what is queued, then close.
    ///
    /// The transport is closed even when the flush fails.
    pub fn close(&mut self) -> DeviceResult<()> {
        if !self.transport.is_open() {
            return Ok(());
        }
        let flushed = self.transport.flush();
        if flushed.is_ok() && !self.config.drain_delay().is_zero() {
            thread::sleep(self.config.drain_delay());
        }
        let closed = self.transport.close();
        info!("Erika session closed on {}", self.config.port);
        flushed.and(closed)
    }

    /// Run `body` inside an open session.
    ///
    /// The session is closed on every exit path. An error from `body` takes
    /// precedence over an error from closing.
    pub fn with_session<R, F>(&mut self, body: F) -> DeviceResult<R>
    where
        F: FnOnce(&mut Self) -> DeviceResult<R>,
    {
        self.open()?;
        let result = body(self);
        let closed = self.close();
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!("Closing after a failed session also failed: {close_err}");
                Err(e)
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> DeviceResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        if !self.transport.is_open() {
            return Err(DeviceError::NotOpen);
        }
        debug!("Writing {:02X?}", bytes);
        self.transport.write(bytes)?;
        if !self.config.rts_cts {
            thread::sleep(self.config.write_delay());
        }
        Ok(())
    }

    /// Print `text`; returns the number of input characters printed.
    ///
    /// Unmappable text follows `print_error_policy`.
    pub fn print_string(&mut self, text: &str) -> DeviceResult<usize> {
        let (bytes, consumed) =
            encode_character_run(text, self.config.line_ending, self.config.print_error_policy)?;
        self.write_bytes(&bytes)?;
        Ok(consumed)
    }

    /// Read `n` keyboard bytes and decode them under `read_error_policy`.
    pub fn read_string(&mut self, n: usize) -> DeviceResult<String> {
        if !self.transport.is_open() {
            return Err(DeviceError::NotOpen);
        }
        let bytes = self.transport.read(n)?;
        let (text, _) = decode(&bytes, self.config.read_error_policy)?;
        Ok(text)
    }

    pub fn move_full_steps(&mut self, direction: Direction, count: u32) -> DeviceResult<()> {
        self.write_bytes(&full_steps(direction, count))
    }

    pub fn move_left(&mut self, count: u32) -> DeviceResult<()> {
        self.move_full_steps(Direction::Left, count)
    }

    pub fn move_right(&mut self, count: u32) -> DeviceResult<()> {
        self.move_full_steps(Direction::Right, count)
    }

    pub fn move_up(&mut self, count: u32) -> DeviceResult<()> {
        self.move_full_steps(Direction::Up, count)
    }

    pub fn move_down(&mut self, count: u32) -> DeviceResult<()> {
        self.move_full_steps(Direction::Down, count)
    }

    pub fn move_microsteps_vertical(
        &mut self,
        direction: VerticalDirection,
        count: u32,
    ) -> DeviceResult<()> {
        self.write_bytes(&vertical_microsteps(direction, count))
    }

    /// Move the carriage by `displacement` microsteps, right when positive.
    pub fn move_microsteps_horizontal(&mut self, displacement: i32) -> DeviceResult<()> {
        self.write_bytes(&horizontal_microsteps(displacement))
    }

    pub fn send(&mut self, command: DeviceCommand) -> DeviceResult<()> {
        let bytes = command.encode()?;
        self.write_bytes(&bytes)?;
        self.modes.apply(command);
        Ok(())
    }

    /// Print `text` stretched to `width` characters.
    pub fn print_justified_line(&mut self, text: &str, width: u32) -> DeviceResult<()> {
        let ops = layout_justified_line(text, width)?;
        let bytes = encode_layout(&ops, self.config.line_ending, self.config.print_error_policy)?;
        self.write_bytes(&bytes)
    }

    /// Erase `text` that ends at the carriage position.
    ///
    /// Correction and reverse printing are switched on, the text is struck
    /// again right to left one grapheme at a time, padded on the left to
    /// `width` positions, and both modes are switched off again. The
    /// switch-off is sent whatever happened before it; the first error is
    /// returned.
    pub fn delete_text(&mut self, text: &str, width: usize) -> DeviceResult<()> {
        let normalized: String = text.nfc().collect();
        let graphemes: Vec<&str> = Graphemes::new(&normalized).map(|g| g.as_str()).collect();
        let mut reversed: String = graphemes.iter().rev().copied().collect();
        reversed.push_str(&" ".repeat(width.saturating_sub(graphemes.len())));

        let struck = self
            .send(DeviceCommand::CorrectionOn)
            .and_then(|()| self.send(DeviceCommand::ReversePrintingOn))
            .and_then(|()| self.print_string(&reversed).map(drop));

        let mut unwound = Ok(());
        for command in [DeviceCommand::ReversePrintingOff, DeviceCommand::CorrectionOff] {
            if let Err(e) = self.send(command) {
                warn!("Failed to send {command:?} while leaving correction mode: {e}");
                if unwound.is_ok() {
                    unwound = Err(e);
                }
            }
        }

        struck.and(unwound)
    }
}

impl<T: Transport> Drop for Erika<T> {
    fn drop(&mut self) {
        if self.transport.is_open() {
            if let Err(e) = self.transport.flush() {
                warn!("Flush on drop failed: {e}");
            }
            if let Err(e) = self.transport.close() {
                warn!("Close on drop failed: {e}");
            }
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(200))]

        #[test]
        fn prop_horizontal_move_preserves_displacement(displacement in -2_000i32..=2_000) {
            let handle = MockTransport::new();
            let config = DeviceConfig {
                drain_delay_ms: 0,
                ..DeviceConfig::new("mock")
            };
            let mut erika = Erika::new(handle.clone(), config);
            erika.open().map_err(|e| TestCaseError::fail(e.to_string()))?;
            erika
                .move_microsteps_horizontal(displacement)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            let written = handle.written();
            prop_assert_eq!(written.len() % 2, 0);
            let mut total = 0i32;
            for pair in written.chunks_exact(2) {
                prop_assert_eq!(pair[0], 0xA5);
                total += i32::from(i8::from_le_bytes([pair[1]]));
            }
            prop_assert_eq!(total, displacement);
        }

        #[test]
        fn prop_delete_text_always_ends_in_default_modes(
            text in "[a-z][a-z ]{0,11}",
            failing_write in 1usize..6,
        ) {
            let handle = MockTransport::new();
            handle.fail_write(failing_write);
            let config = DeviceConfig {
                drain_delay_ms: 0,
                ..DeviceConfig::new("mock")
            };
            let mut erika = Erika::new(handle.clone(), config);
            erika.open().map_err(|e| TestCaseError::fail(e.to_string()))?;
            let width = text.chars().count();
            let result = erika.delete_text(&text, width);

            // Only a failed switch-off can leave a mode set.
            if failing_write < 4 || result.is_ok() {
                prop_assert!(erika.print_modes().is_default());
            }
            let history = handle.write_history();
            let ends_with_correction_off = history.last() == Some(&vec![0x8D]);
            prop_assert!(ends_with_correction_off || failing_write >= 4);
        }
    }
}
