//! Serial driver for the Erika 3004 electronic typewriter.
//!
//! Ties the DDRSCII codec and the command encoders to a byte transport.
//! The serial line is the default transport; [`transport::mock`] provides
//! an in-memory one for tests.
//!
//! ```no_run
//! use erika_device::{DeviceConfig, Erika};
//!
//! # fn main() -> erika_device::DeviceResult<()> {
//! let mut erika = Erika::connect(DeviceConfig::new("/dev/ttyAMA0"))?;
//! erika.with_session(|erika| {
//!     erika.print_justified_line("Heute war der Future SOC Lab Day", 40)?;
//!     erika.print_string("\n")?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]

pub mod config;
pub mod erika;
pub mod error;
pub mod transport;

pub use config::{DEFAULT_BAUD_RATE, DeviceConfig, is_supported_baud_rate, supported_baud_rates};
pub use erika::Erika;
pub use error::{DeviceError, DeviceResult};
pub use transport::{SerialTransport, Transport};
