//! Device configuration.
//!
//! A config can come from YAML or JSON, from code, or from a mix of a file
//! and `ERIKA_*` environment overrides. Missing fields take the defaults
//! of a stock Erika on a 1200 baud line with hardware flow control.

use std::path::Path;
use std::time::Duration;

use erika_ddrscii::ErrorPolicy;
use erika_protocol::LineEnding;
use erika_protocol::opcodes::BAUD_SELECTORS;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeviceError, DeviceResult};

pub const DEFAULT_BAUD_RATE: u32 = 1200;

pub const ENV_PORT: &str = "ERIKA_PORT";
pub const ENV_BAUD_RATE: &str = "ERIKA_BAUD_RATE";
pub const ENV_PRINT_ERROR_POLICY: &str = "ERIKA_PRINT_ERROR_POLICY";
pub const ENV_READ_ERROR_POLICY: &str = "ERIKA_READ_ERROR_POLICY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Serial port name, e.g. `/dev/ttyAMA0` or `COM3`.
    pub port: String,
    pub baud_rate: u32,
    /// RTS/CTS hardware flow control.
    pub rts_cts: bool,
    pub line_ending: LineEnding,
    /// Policy for text sent to the machine; `ignore` prints a space in
    /// place of anything the typewheel cannot strike.
    #[serde(with = "error_policy_serde")]
    pub print_error_policy: ErrorPolicy,
    /// Policy for bytes read back from the keyboard.
    #[serde(with = "error_policy_serde")]
    pub read_error_policy: ErrorPolicy,
    /// Pause after each write when flow control is off.
    pub write_delay_ms: u64,
    /// Pause before closing so queued characters get printed.
    pub drain_delay_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            rts_cts: true,
            line_ending: LineEnding::Unix,
            print_error_policy: ErrorPolicy::Ignore,
            read_error_policy: ErrorPolicy::Strict,
            write_delay_ms: 100,
            drain_delay_ms: 1000,
            read_timeout_ms: 1000,
        }
    }
}

impl DeviceConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> DeviceResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> DeviceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> DeviceResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!("Loading device config from {}", path.display());
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    pub fn to_yaml_string(&self) -> DeviceResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// # Errors
    ///
    /// `Config` for an empty port name or a baud rate the machine cannot run at.
    pub fn validate(&self) -> DeviceResult<()> {
        if self.port.trim().is_empty() {
            return Err(DeviceError::config("port must not be empty"));
        }
        if !is_supported_baud_rate(self.baud_rate) {
            return Err(DeviceError::config(format!(
                "unsupported baud rate {}, expected one of {:?}",
                self.baud_rate,
                supported_baud_rates().collect::<Vec<_>>()
            )));
        }
        Ok(())
    }

    /// Apply `ERIKA_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> DeviceResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            debug!("{ENV_PORT} overrides port with {port}");
            self.port = port;
        }
        if let Some(baud) = lookup(ENV_BAUD_RATE) {
            self.baud_rate = baud.trim().parse().map_err(|e| {
                DeviceError::config(format!("{ENV_BAUD_RATE}={baud:?} is not a baud rate: {e}"))
            })?;
        }
        if let Some(policy) = lookup(ENV_PRINT_ERROR_POLICY) {
            self.print_error_policy = parse_policy(ENV_PRINT_ERROR_POLICY, &policy)?;
        }
        if let Some(policy) = lookup(ENV_READ_ERROR_POLICY) {
            self.read_error_policy = parse_policy(ENV_READ_ERROR_POLICY, &policy)?;
        }
        Ok(())
    }

    pub fn apply_process_env(&mut self) -> DeviceResult<()> {
        self.apply_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn write_delay(&self) -> Duration {
        Duration::from_millis(self.write_delay_ms)
    }

    pub fn drain_delay(&self) -> Duration {
        Duration::from_millis(self.drain_delay_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn parse_policy(key: &str, raw: &str) -> DeviceResult<ErrorPolicy> {
    raw.trim()
        .parse()
        .map_err(|e| DeviceError::config(format!("{key}: {e}")))
}

pub fn supported_baud_rates() -> impl Iterator<Item = u32> {
    BAUD_SELECTORS.iter().map(|(rate, _)| *rate)
}

pub fn is_supported_baud_rate(baud: u32) -> bool {
    supported_baud_rates().any(|rate| rate == baud)
}

mod error_policy_serde {
    use erika_ddrscii::ErrorPolicy;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(policy: &ErrorPolicy, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(policy.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ErrorPolicy, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
