//! # Public Key Value Object
//!
//! A 32-byte public key as it appears on the wire, plus the text encodings
//! callers may use to present it.
//!
//! The codec itself only moves raw bytes. Choosing base58 (the usual Solana
//! presentation), base64 or hex is left to whoever converts values to and
//! from text.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::domain::pubkey::{Pubkey, PubkeyEncoding};
//!
//! let key = Pubkey::new([0u8; 32]);
//! let text = PubkeyEncoding::Base58.encode(&key);
//! assert_eq!(text, "11111111111111111111111111111111");
//! assert_eq!(PubkeyEncoding::Base58.decode(&text).unwrap(), key);
//! ```

use crate::domain::errors::{CodecError, CodecResult};
use crate::domain::schema::PUBKEY_LENGTH;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey([u8; PUBKEY_LENGTH]);

impl Pubkey {
    /// Creates a key from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBKEY_LENGTH] {
        &self.0
    }

    /// Returns the key in base58, the conventional Solana form.
    #[must_use]
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl TryFrom<&[u8]> for Pubkey {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; PUBKEY_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CodecError::InvalidKeyLength {
                expected: PUBKEY_LENGTH,
                actual: bytes.len(),
            })
    }
}

impl From<[u8; PUBKEY_LENGTH]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// Text encoding used when a public key crosses into JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PubkeyEncoding {
    /// Bitcoin-alphabet base58.
    #[default]
    Base58,
    /// Standard base64 with padding.
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

impl PubkeyEncoding {
    /// Renders a key as text.
    #[must_use]
    pub fn encode(&self, key: &Pubkey) -> String {
        match self {
            Self::Base58 => key.to_base58(),
            Self::Base64 => STANDARD.encode(key.as_bytes()),
            Self::Hex => hex::encode(key.as_bytes()),
        }
    }

    /// Parses key text.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidValue` if the text is not valid in this
    /// encoding, and `CodecError::InvalidKeyLength` if it does not decode
    /// to exactly 32 bytes.
    pub fn decode(&self, text: &str) -> CodecResult<Pubkey> {
        let text = text.trim();
        let bytes = match self {
            Self::Base58 => bs58::decode(text)
                .into_vec()
                .map_err(|e| CodecError::invalid_value(format!("invalid base58 key: {e}")))?,
            Self::Base64 => STANDARD
                .decode(text)
                .map_err(|e| CodecError::invalid_value(format!("invalid base64 key: {e}")))?,
            Self::Hex => hex::decode(text.trim_start_matches("0x"))
                .map_err(|e| CodecError::invalid_value(format!("invalid hex key: {e}")))?,
        };
        Pubkey::try_from(bytes.as_slice())
    }

    /// Returns the configuration name of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base58 => "base58",
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for PubkeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PubkeyEncoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base58" => Ok(Self::Base58),
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            other => Err(CodecError::invalid_value(format!(
                "unknown pubkey encoding: {other}"
            ))),
        }
    }
}
