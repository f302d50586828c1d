//! Erika protocol error types.

use erika_ddrscii::CodecError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Parameter {name} out of range: {value} not in {min}..={max}")]
    OutOfRangeParameter {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ProtocolError {
    pub fn out_of_range(name: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRangeParameter {
            name,
            value,
            min,
            max,
        }
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Check `value` against an inclusive bound, failing before anything is encoded.
pub(crate) fn check_range(name: &'static str, value: i64, min: i64, max: i64) -> ProtocolResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProtocolError::out_of_range(name, value, min, max))
    }
}
