//! # Application Errors
//!
//! Error types for the application layer.
//!
//! The inspector itself never returns these: codec failures are reported as
//! result data. They cover the work around it, such as turning user text
//! into bytes, loading schemas and reading configuration.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── InvalidHex(String)        - hex input could not be parsed
//! ├── InvalidBase64(String)     - base64 input could not be parsed
//! ├── Codec(CodecError)         - schema or value conversion failure
//! ├── UnknownSchema(String)     - no fixture with that name
//! └── Configuration(String)     - configuration could not be loaded
//! ```
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::application::error::ApplicationError;
//!
//! let err = ApplicationError::invalid_hex("odd number of digits");
//! assert!(err.is_input_error());
//! ```

use crate::domain::errors::CodecError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Hex input could not be parsed.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// Base64 input could not be parsed.
    #[error("invalid base64 input: {0}")]
    InvalidBase64(String),

    /// Schema parsing or value conversion failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// No schema with the requested name.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Creates an invalid hex error.
    #[must_use]
    pub fn invalid_hex(message: impl Into<String>) -> Self {
        Self::InvalidHex(message.into())
    }

    /// Creates an invalid base64 error.
    #[must_use]
    pub fn invalid_base64(message: impl Into<String>) -> Self {
        Self::InvalidBase64(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the error was caused by user-supplied input text.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidHex(_) | Self::InvalidBase64(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_errors_convert_transparently() {
        let err: ApplicationError = CodecError::MissingField("owner".to_string()).into();
        assert_eq!(err.to_string(), "missing field: owner");
        assert!(!err.is_input_error());
    }

    #[test]
    fn constructors() {
        assert_eq!(
            ApplicationError::invalid_base64("bad padding").to_string(),
            "invalid base64 input: bad padding"
        );
        assert_eq!(
            ApplicationError::configuration("missing file").to_string(),
            "configuration error: missing file"
        );
        assert!(ApplicationError::invalid_base64("x").is_input_error());
    }
}
