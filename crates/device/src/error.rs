//! Device error types.

use erika_ddrscii::CodecError;
use erika_protocol::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transport is not open")]
    NotOpen,
}

impl From<CodecError> for DeviceError {
    fn from(err: CodecError) -> Self {
        Self::Protocol(ProtocolError::Codec(err))
    }
}

impl DeviceError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error came from the line rather than from the caller's input.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Serial(_) | Self::NotOpen)
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;
