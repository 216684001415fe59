//! # Codec Errors
//!
//! Error types for schema-driven encoding and decoding.
//!
//! Every failure raised while walking a schema is a [`CodecError`]. The
//! error travels up through the recursive codec as a `Result` and is
//! converted into result data only at the inspector boundary.
//!
//! # Error Taxonomy
//!
//! ```text
//! CodecError
//! ├── UnexpectedEndOfBuffer   - read past the end of the input
//! ├── InvalidUtf8             - string payload is not UTF-8
//! ├── InvalidKeyLength        - pubkey is not exactly 32 bytes
//! ├── InvalidDiscriminant     - enum tag has no variant
//! ├── UnknownVariant          - encode value names a missing variant
//! ├── ArrayLengthMismatch     - fixed array value has the wrong length
//! ├── MissingField            - struct value lacks a schema field
//! ├── UnsupportedKind         - schema names an unknown kind
//! ├── TypeMismatch            - value shape does not match schema node
//! ├── InvalidValue            - value cannot be represented on the wire
//! └── InvalidSchema           - schema document is malformed
//! ```
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::domain::errors::{CodecError, ErrorKind};
//!
//! let err = CodecError::InvalidDiscriminant { value: 3, max: 2 };
//! assert_eq!(err.kind(), ErrorKind::InvalidDiscriminant);
//! assert_eq!(err.to_string(), "invalid enum discriminant 3 (max 2)");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while encoding or decoding against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A read requested more bytes than remain in the buffer.
    #[error(
        "unexpected end of buffer: need {requested} bytes at offset {offset}, {remaining} remaining"
    )]
    UnexpectedEndOfBuffer {
        /// Cursor offset at which the read was attempted.
        offset: usize,
        /// Bytes requested by the read.
        requested: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A string payload is not valid UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}: {reason}")]
    InvalidUtf8 {
        /// Offset of the string payload (after the length prefix).
        offset: usize,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A public key did not resolve to exactly 32 bytes.
    #[error("invalid public key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// An enum discriminant has no corresponding variant.
    #[error("invalid enum discriminant {value} (max {max})")]
    InvalidDiscriminant {
        /// Discriminant byte read from the buffer.
        value: u8,
        /// Highest valid discriminant for the enum.
        max: usize,
    },

    /// An enum value names a variant that the schema does not declare.
    #[error("unknown enum variant: {0}")]
    UnknownVariant(String),

    /// A fixed-size array value has the wrong number of elements.
    #[error("array length mismatch: expected {expected}, got {actual}")]
    ArrayLengthMismatch {
        /// Length declared by the schema.
        expected: usize,
        /// Length of the supplied value.
        actual: usize,
    },

    /// A struct value lacks a field required by the schema.
    #[error("missing field: {0}")]
    MissingField(String),

    /// The schema uses a type kind the codec does not recognize.
    #[error("unsupported type kind: {0}")]
    UnsupportedKind(String),

    /// A value does not have the shape required by its schema node.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind required by the schema.
        expected: String,
        /// Kind of the supplied value.
        found: String,
    },

    /// A value cannot be represented in the wire format.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The schema document is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl CodecError {
    /// Creates a buffer exhaustion error.
    #[must_use]
    pub fn end_of_buffer(offset: usize, requested: usize, remaining: usize) -> Self {
        Self::UnexpectedEndOfBuffer {
            offset,
            requested,
            remaining,
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedEndOfBuffer { .. } => ErrorKind::BufferExhausted,
            Self::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Self::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            Self::InvalidDiscriminant { .. } => ErrorKind::InvalidDiscriminant,
            Self::UnknownVariant(_) => ErrorKind::UnknownVariant,
            Self::ArrayLengthMismatch { .. } => ErrorKind::ArrayLengthMismatch,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::UnsupportedKind(_) => ErrorKind::UnsupportedKind,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::InvalidSchema(_) => ErrorKind::InvalidSchema,
        }
    }

    /// Returns true if the error was caused by the input bytes rather than
    /// by the schema or the value being encoded.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEndOfBuffer { .. }
                | Self::InvalidUtf8 { .. }
                | Self::InvalidDiscriminant { .. }
        )
    }
}

/// Coarse classification of a [`CodecError`].
///
/// Carried on inspector results so callers can branch on the failure
/// without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Requested read exceeds the remaining bytes.
    BufferExhausted,
    /// String bytes are not UTF-8.
    InvalidUtf8,
    /// Public key is not 32 bytes.
    InvalidKeyLength,
    /// Enum discriminant has no variant.
    InvalidDiscriminant,
    /// Enum value names an undeclared variant.
    UnknownVariant,
    /// Fixed array value has the wrong length.
    ArrayLengthMismatch,
    /// Struct value lacks a field.
    MissingField,
    /// Schema uses an unrecognized kind.
    UnsupportedKind,
    /// Value shape does not match the schema.
    TypeMismatch,
    /// Value cannot be represented on the wire.
    InvalidValue,
    /// Schema document is malformed.
    InvalidSchema,
}

impl ErrorKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BufferExhausted => "buffer_exhausted",
            Self::InvalidUtf8 => "invalid_utf8",
            Self::InvalidKeyLength => "invalid_key_length",
            Self::InvalidDiscriminant => "invalid_discriminant",
            Self::UnknownVariant => "unknown_variant",
            Self::ArrayLengthMismatch => "array_length_mismatch",
            Self::MissingField => "missing_field",
            Self::UnsupportedKind => "unsupported_kind",
            Self::TypeMismatch => "type_mismatch",
            Self::InvalidValue => "invalid_value",
            Self::InvalidSchema => "invalid_schema",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
