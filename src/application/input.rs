//! # Byte Sources
//!
//! Conversion of user-supplied text into the raw bytes handed to the
//! inspector.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::application::input::{parse_bytes, ByteSource};
//!
//! assert_eq!(parse_bytes("0x01 2c:01", ByteSource::Hex).unwrap(), vec![0x01, 0x2c, 0x01]);
//! assert_eq!(parse_bytes("ASwB", ByteSource::Base64).unwrap(), vec![0x01, 0x2c, 0x01]);
//! assert_eq!(parse_bytes("hi", ByteSource::Text).unwrap(), b"hi".to_vec());
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How input text represents bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteSource {
    /// Hexadecimal digits, optional `0x` prefix, separators ignored.
    #[default]
    Hex,
    /// Standard base64 with padding.
    Base64,
    /// UTF-8 text taken byte for byte.
    Text,
}

impl ByteSource {
    /// Returns the name of the source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteSource {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "text" | "utf8" | "utf-8" => Ok(Self::Text),
            other => Err(ApplicationError::configuration(format!(
                "unknown input format: {other}"
            ))),
        }
    }
}

/// Converts input text into bytes.
///
/// # Errors
///
/// Returns `ApplicationError::InvalidHex` when the hex digits are of odd
/// count, and `ApplicationError::InvalidBase64` when the base64 text does
/// not decode.
pub fn parse_bytes(input: &str, source: ByteSource) -> ApplicationResult<Vec<u8>> {
    match source {
        ByteSource::Hex => parse_hex(input),
        ByteSource::Base64 => {
            let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| ApplicationError::invalid_base64(e.to_string()))
        }
        ByteSource::Text => Ok(input.as_bytes().to_vec()),
    }
}

fn parse_hex(input: &str) -> ApplicationResult<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body.chars().filter(char::is_ascii_hexdigit).collect();
    hex::decode(&digits).map_err(|e| ApplicationError::invalid_hex(e.to_string()))
}
