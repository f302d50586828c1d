//! DDRSCII codec error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Unsupported character: {0:?}")]
    UnsupportedCharacter(char),

    #[error("Unsupported combining mark {mark:?} on {base:?}")]
    UnsupportedCombiningMark { mark: char, base: char },

    #[error("Unknown device byte: 0x{0:02X}")]
    UnknownDeviceByte(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::UnsupportedCharacter('€');
        assert_eq!(err.to_string(), "Unsupported character: '€'");

        let err = CodecError::UnknownDeviceByte(0x7F);
        assert_eq!(err.to_string(), "Unknown device byte: 0x7F");
    }

    #[test]
    fn test_combining_mark_display_names_base() {
        let err = CodecError::UnsupportedCombiningMark {
            mark: '\u{0303}',
            base: 'n',
        };
        assert!(err.to_string().contains("'n'"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = CodecError::InvalidConfiguration("bogus".into());
        let _: &dyn std::error::Error = &err;
    }
}
