//! Byte transport to the typewriter.

use std::time::Duration;

use serialport::{FlowControl, SerialPort};
use tracing::{debug, info};

use crate::config::DeviceConfig;
use crate::error::{DeviceError, DeviceResult};

/// A duplex byte stream with an explicit open/close lifecycle.
pub trait Transport {
    fn open(&mut self) -> DeviceResult<()>;

    fn close(&mut self) -> DeviceResult<()>;

    fn is_open(&self) -> bool;

    /// Blocking read of exactly `n` bytes.
    fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>>;

    /// Blocking write of the whole buffer; returns the byte count.
    fn write(&mut self, bytes: &[u8]) -> DeviceResult<usize>;

    fn flush(&mut self) -> DeviceResult<()>;
}

/// Serial line transport.
pub struct SerialTransport {
    port_name: String,
    baud_rate: u32,
    rts_cts: bool,
    timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            port_name: config.port.clone(),
            baud_rate: config.baud_rate,
            rts_cts: config.rts_cts,
            timeout: config.read_timeout(),
            port: None,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    fn port_mut(&mut self) -> DeviceResult<&mut (dyn SerialPort + 'static)> {
        self.port.as_deref_mut().ok_or(DeviceError::NotOpen)
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> DeviceResult<()> {
        if self.port.is_some() {
            return Ok(());
        }
        let flow_control = if self.rts_cts {
            FlowControl::Hardware
        } else {
            FlowControl::None
        };
        let port = serialport::new(&self.port_name, self.baud_rate)
            .timeout(self.timeout)
            .flow_control(flow_control)
            .open()?;
        info!(
            "Opened {} @ {} baud (flow control: {:?})",
            self.port_name, self.baud_rate, flow_control
        );
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) -> DeviceResult<()> {
        if self.port.take().is_some() {
            info!("Closed {}", self.port_name);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>> {
        let port = self.port_mut()?;
        let mut buf = vec![0u8; n];
        port.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn write(&mut self, bytes: &[u8]) -> DeviceResult<usize> {
        let port = self.port_mut()?;
        port.write_all(bytes)?;
        debug!("Wrote {} bytes", bytes.len());
        Ok(bytes.len())
    }

    fn flush(&mut self) -> DeviceResult<()> {
        self.port_mut()?.flush()?;
        Ok(())
    }
}

pub mod mock {
    //! In-memory transport for tests.
    //!
    //! Clones share state, so a test can keep one handle for inspection
    //! while the driver owns another.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Debug, Default)]
    struct MockState {
        open: bool,
        read_queue: VecDeque<u8>,
        write_history: Vec<Vec<u8>>,
        write_attempts: usize,
        failing_writes: Vec<usize>,
        fail_open: bool,
        open_count: usize,
        close_count: usize,
        flush_count: usize,
    }

    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        state: Arc<Mutex<MockState>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        pub fn queue_read(&self, data: &[u8]) {
            self.state().read_queue.extend(data.iter().copied());
        }

        /// Make the `n`-th write call (1-based, counted from creation) fail.
        pub fn fail_write(&self, n: usize) {
            self.state().failing_writes.push(n);
        }

        pub fn fail_open(&self) {
            self.state().fail_open = true;
        }

        /// Successful writes, one entry per call.
        pub fn write_history(&self) -> Vec<Vec<u8>> {
            self.state().write_history.clone()
        }

        /// All successfully written bytes, concatenated.
        pub fn written(&self) -> Vec<u8> {
            self.state().write_history.concat()
        }

        pub fn write_attempts(&self) -> usize {
            self.state().write_attempts
        }

        pub fn open_count(&self) -> usize {
            self.state().open_count
        }

        pub fn close_count(&self) -> usize {
            self.state().close_count
        }

        pub fn flush_count(&self) -> usize {
            self.state().flush_count
        }
    }

    impl Transport for MockTransport {
        fn open(&mut self) -> DeviceResult<()> {
            let mut state = self.state();
            if state.fail_open {
                return Err(DeviceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "mock port unavailable",
                )));
            }
            state.open = true;
            state.open_count += 1;
            Ok(())
        }

        fn close(&mut self) -> DeviceResult<()> {
            let mut state = self.state();
            if state.open {
                state.open = false;
                state.close_count += 1;
            }
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.state().open
        }

        fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>> {
            let mut state = self.state();
            if !state.open {
                return Err(DeviceError::NotOpen);
            }
            if state.read_queue.len() < n {
                return Err(DeviceError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "no data available",
                )));
            }
            Ok(state.read_queue.drain(..n).collect())
        }

        fn write(&mut self, bytes: &[u8]) -> DeviceResult<usize> {
            let mut state = self.state();
            if !state.open {
                return Err(DeviceError::NotOpen);
            }
            state.write_attempts += 1;
            let attempt = state.write_attempts;
            if state.failing_writes.contains(&attempt) {
                return Err(DeviceError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    format!("injected failure on write {attempt}"),
                )));
            }
            state.write_history.push(bytes.to_vec());
            Ok(bytes.len())
        }

        fn flush(&mut self) -> DeviceResult<()> {
            let mut state = self.state();
            if !state.open {
                return Err(DeviceError::NotOpen);
            }
            state.flush_count += 1;
            Ok(())
        }
    }
}
