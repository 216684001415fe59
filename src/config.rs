//! # Inspector Configuration
//!
//! Presentation settings for the inspector and its command-line tools.
//!
//! Settings are layered: built-in defaults, then an optional configuration
//! file (TOML or JSON, chosen by extension), then environment variables
//! prefixed with `BORSH_INSPECT_`. A `.env` file in the working directory
//! is loaded first when present.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::config::InspectorConfig;
//! use borsh_inspect::domain::pubkey::PubkeyEncoding;
//!
//! let config = InspectorConfig::default().with_pubkey_encoding(PubkeyEncoding::Hex);
//! assert_eq!(config.pubkey_encoding(), PubkeyEncoding::Hex);
//! assert!(config.pretty_json());
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::input::ByteSource;
use crate::domain::pubkey::PubkeyEncoding;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override configuration.
pub const ENV_PREFIX: &str = "BORSH_INSPECT";

/// Inspector settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Text encoding for public keys in JSON values.
    pubkey_encoding: PubkeyEncoding,
    /// Whether JSON output is indented.
    pretty_json: bool,
    /// Input format assumed when none is given.
    default_input: ByteSource,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            pubkey_encoding: PubkeyEncoding::Base58,
            pretty_json: true,
            default_input: ByteSource::Hex,
        }
    }
}

impl InspectorConfig {
    /// Loads configuration from defaults, an optional file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the file cannot be read
    /// or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        // a missing .env file is not an error
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("pubkey_encoding", defaults.pubkey_encoding.as_str())
            .and_then(|b| b.set_default("pretty_json", defaults.pretty_json))
            .and_then(|b| b.set_default("default_input", defaults.default_input.as_str()))
            .map_err(|e| ApplicationError::configuration(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let loaded: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ApplicationError::configuration(e.to_string()))?;

        tracing::debug!(
            pubkey_encoding = %loaded.pubkey_encoding,
            pretty_json = loaded.pretty_json,
            default_input = %loaded.default_input,
            "loaded inspector configuration"
        );
        Ok(loaded)
    }

    /// Sets the public key text encoding.
    #[must_use]
    pub fn with_pubkey_encoding(mut self, encoding: PubkeyEncoding) -> Self {
        self.pubkey_encoding = encoding;
        self
    }

    /// Sets whether JSON output is indented.
    #[must_use]
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Sets the default input format.
    #[must_use]
    pub fn with_default_input(mut self, source: ByteSource) -> Self {
        self.default_input = source;
        self
    }

    /// Returns the public key text encoding.
    #[inline]
    #[must_use]
    pub fn pubkey_encoding(&self) -> PubkeyEncoding {
        self.pubkey_encoding
    }

    /// Returns whether JSON output is indented.
    #[inline]
    #[must_use]
    pub fn pretty_json(&self) -> bool {
        self.pretty_json
    }

    /// Returns the default input format.
    #[inline]
    #[must_use]
    pub fn default_input(&self) -> ByteSource {
        self.default_input
    }
}
