//! # Inspector
//!
//! The public entry points for decoding raw bytes and encoding structured
//! values against a [`Schema`].
//!
//! Every failure anywhere in the recursive walk is caught here and turned
//! into result data: callers get a [`DecodedResult`] or [`EncodedResult`]
//! whose `is_valid` flag is the only success discriminator. No partial
//! value or partial buffer accompanies a failure.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::application::inspector::{decode, encode};
//! use borsh_inspect::domain::schema::{Field, PrimitiveType, Schema, Type};
//! use borsh_inspect::domain::value::Value;
//!
//! let schema = Schema::new(
//!     "Counter",
//!     Type::structure(vec![
//!         Field::new("flag", Type::primitive(PrimitiveType::Bool)),
//!         Field::new("count", Type::primitive(PrimitiveType::U32)),
//!     ]),
//! );
//! let value = Value::record([("flag", Value::Bool(true)), ("count", Value::U32(300))]);
//!
//! let encoded = encode(&value, &schema);
//! assert!(encoded.is_valid);
//! assert_eq!(encoded.hex, "012c010000");
//!
//! let decoded = decode(&encoded.encoded, &schema);
//! assert_eq!(decoded.data, Some(value));
//! ```

use crate::config::InspectorConfig;
use crate::domain::errors::{CodecError, CodecResult, ErrorKind};
use crate::domain::pubkey::PubkeyEncoding;
use crate::domain::schema::Schema;
use crate::domain::value::Value;
use crate::infrastructure::borsh::{ByteReader, ByteWriter, decode_value, encode_value};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use serde_json::Value as Json;

/// Outcome of decoding a byte buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedResult {
    /// Name of the schema used.
    pub schema_name: String,
    /// Decoded value, present only when `is_valid`.
    pub data: Option<Value>,
    /// The input bytes.
    #[serde(serialize_with = "serialize_hex")]
    pub raw: Vec<u8>,
    /// Whether decoding succeeded.
    pub is_valid: bool,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Bytes read by the schema walk.
    pub bytes_consumed: usize,
    /// Bytes left over after the root value.
    pub trailing_bytes: usize,
}

impl DecodedResult {
    fn success(schema: &Schema, raw: &[u8], data: Value, consumed: usize) -> Self {
        Self {
            schema_name: schema.name.clone(),
            data: Some(data),
            raw: raw.to_vec(),
            is_valid: true,
            error: None,
            error_kind: None,
            bytes_consumed: consumed,
            trailing_bytes: raw.len().saturating_sub(consumed),
        }
    }

    fn failure(schema: &Schema, raw: &[u8], err: &CodecError) -> Self {
        Self {
            schema_name: schema.name.clone(),
            data: None,
            raw: raw.to_vec(),
            is_valid: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            bytes_consumed: 0,
            trailing_bytes: 0,
        }
    }

    /// Renders the result as JSON with public keys in `encoding`.
    #[must_use]
    pub fn to_json(&self, encoding: PubkeyEncoding) -> Json {
        let mut json = serde_json::to_value(self).unwrap_or(Json::Null);
        if let (Some(object), Some(data)) = (json.as_object_mut(), &self.data) {
            object.insert("data".to_string(), data.to_json(encoding));
        }
        json
    }
}

/// Outcome of encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedResult {
    /// Encoded bytes, empty unless `is_valid`.
    #[serde(skip)]
    pub encoded: Vec<u8>,
    /// Lowercase hex of `encoded`.
    pub hex: String,
    /// Standard base64 of `encoded`.
    pub base64: String,
    /// Length of `encoded`.
    pub length: usize,
    /// Whether encoding succeeded.
    pub is_valid: bool,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl EncodedResult {
    fn success(encoded: Vec<u8>) -> Self {
        Self {
            hex: hex::encode(&encoded),
            base64: STANDARD.encode(&encoded),
            length: encoded.len(),
            encoded,
            is_valid: true,
            error: None,
            error_kind: None,
        }
    }

    fn failure(err: &CodecError) -> Self {
        Self {
            encoded: Vec::new(),
            hex: String::new(),
            base64: String::new(),
            length: 0,
            is_valid: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }
}

/// Schema-driven Borsh inspector.
///
/// Holds only configuration; every call builds its own reader or writer,
/// so one inspector can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inspector {
    config: InspectorConfig,
}

impl Inspector {
    /// Creates an inspector.
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Decodes `bytes` as an instance of `schema`.
    #[must_use]
    pub fn decode(&self, bytes: &[u8], schema: &Schema) -> DecodedResult {
        let mut reader = ByteReader::new(bytes);
        match decode_value(&mut reader, &schema.ty) {
            Ok(value) => {
                let result = DecodedResult::success(schema, bytes, value, reader.position());
                tracing::debug!(
                    schema = %schema.name,
                    consumed = result.bytes_consumed,
                    trailing = result.trailing_bytes,
                    "decoded buffer"
                );
                result
            }
            Err(err) => {
                tracing::debug!(schema = %schema.name, len = bytes.len(), error = %err, "decode failed");
                DecodedResult::failure(schema, bytes, &err)
            }
        }
    }

    /// Decodes `bytes` and renders the full result as JSON.
    #[must_use]
    pub fn decode_to_json(&self, bytes: &[u8], schema: &Schema) -> Json {
        self.decode(bytes, schema)
            .to_json(self.config.pubkey_encoding())
    }

    /// Encodes `value` as an instance of `schema`.
    #[must_use]
    pub fn encode(&self, value: &Value, schema: &Schema) -> EncodedResult {
        self.finish_encode(schema, encode_to_vec(value, schema))
    }

    /// Converts a JSON value using the schema, then encodes it.
    ///
    /// Conversion failures (wrong shapes, out-of-range numbers, bad key
    /// text) are reported the same way as encoding failures.
    #[must_use]
    pub fn encode_json(&self, json: &Json, schema: &Schema) -> EncodedResult {
        let encoded = Value::from_json(json, &schema.ty, self.config.pubkey_encoding())
            .and_then(|value| encode_to_vec(&value, schema));
        self.finish_encode(schema, encoded)
    }

    fn finish_encode(&self, schema: &Schema, encoded: CodecResult<Vec<u8>>) -> EncodedResult {
        match encoded {
            Ok(bytes) => {
                tracing::debug!(schema = %schema.name, len = bytes.len(), "encoded value");
                EncodedResult::success(bytes)
            }
            Err(err) => {
                tracing::debug!(schema = %schema.name, error = %err, "encode failed");
                EncodedResult::failure(&err)
            }
        }
    }
}

/// Upper bound on the writer preallocation taken from a schema's size.
const MAX_CAPACITY_HINT: usize = 4096;

fn encode_to_vec(value: &Value, schema: &Schema) -> CodecResult<Vec<u8>> {
    let hint = schema
        .ty
        .fixed_size()
        .filter(|size| *size <= MAX_CAPACITY_HINT)
        .unwrap_or(64);
    let mut writer = ByteWriter::with_capacity(hint);
    encode_value(&mut writer, value, &schema.ty)?;
    Ok(writer.finish().to_vec())
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Decodes `bytes` with the default configuration.
#[must_use]
pub fn decode(bytes: &[u8], schema: &Schema) -> DecodedResult {
    Inspector::default().decode(bytes, schema)
}

/// Encodes `value` with the default configuration.
#[must_use]
pub fn encode(value: &Value, schema: &Schema) -> EncodedResult {
    Inspector::default().encode(value, schema)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::pubkey::Pubkey;
    use crate::domain::schema::{Field, PrimitiveType, Type};
    use serde_json::json;

    fn counter() -> Schema {
        Schema::new(
            "Counter",
            Type::structure(vec![
                Field::new("flag", Type::primitive(PrimitiveType::Bool)),
                Field::new("count", Type::primitive(PrimitiveType::U32)),
            ]),
        )
    }

    mod decoding {
        use super::*;

        #[test]
        fn success_reports_consumption() {
            let result = decode(&[1, 0x2c, 1, 0, 0, 0xaa], &counter());
            assert!(result.is_valid);
            assert_eq!(result.bytes_consumed, 5);
            assert_eq!(result.trailing_bytes, 1);
            assert_eq!(result.schema_name, "Counter");
            assert!(result.error.is_none());
        }

        #[test]
        fn failure_carries_no_data() {
            let result = decode(&[1, 0x2c, 1], &counter());
            assert!(!result.is_valid);
            assert!(result.data.is_none());
            assert_eq!(result.error_kind, Some(ErrorKind::BufferExhausted));
            assert_eq!(
                result.error.as_deref(),
                Some("unexpected end of buffer: need 4 bytes at offset 1, 2 remaining")
            );
            assert_eq!(result.raw, vec![1, 0x2c, 1]);
        }

        #[test]
        fn json_form_uses_camel_case_and_configured_keys() {
            let schema = Schema::new("Key", Type::primitive(PrimitiveType::Pubkey));
            let inspector = Inspector::new(
                InspectorConfig::default().with_pubkey_encoding(PubkeyEncoding::Hex),
            );
            let json = inspector.decode_to_json(&[0x11; 32], &schema);
            assert_eq!(json["isValid"], json!(true));
            assert_eq!(json["schemaName"], json!("Key"));
            assert_eq!(json["data"], json!("11".repeat(32)));
            assert_eq!(json["raw"], json!("11".repeat(32)));
            assert!(json.get("error").is_none());
        }
    }

    mod encoding {
        use super::*;

        #[test]
        fn success_has_all_representations() {
            let value = Value::record([("flag", Value::Bool(true)), ("count", Value::U32(300))]);
            let result = encode(&value, &counter());
            assert!(result.is_valid);
            assert_eq!(result.encoded, vec![0x01, 0x2c, 0x01, 0x00, 0x00]);
            assert_eq!(result.hex, "012c010000");
            assert_eq!(result.base64, "ASwBAAA=");
            assert_eq!(result.length, 5);
        }

        #[test]
        fn failure_emits_no_bytes() {
            let schema = Schema::new("Quad", Type::array(Type::primitive(PrimitiveType::U8), 4));
            let value = Value::Seq((1..=5).map(Value::U8).collect());
            let result = encode(&value, &schema);
            assert!(!result.is_valid);
            assert!(result.encoded.is_empty());
            assert!(result.hex.is_empty());
            assert_eq!(result.length, 0);
            assert_eq!(result.error_kind, Some(ErrorKind::ArrayLengthMismatch));
        }

        #[test]
        fn huge_declared_array_fails_without_allocating() {
            let schema = Schema::new(
                "Huge",
                Type::array(Type::primitive(PrimitiveType::U16), 1 << 62),
            );
            let result = encode(&Value::Seq(vec![Value::U16(1)]), &schema);
            assert!(!result.is_valid);
            assert!(result.encoded.is_empty());
            assert_eq!(result.error_kind, Some(ErrorKind::ArrayLengthMismatch));

            let decoded = decode(&[1, 0], &schema);
            assert!(!decoded.is_valid);
            assert_eq!(decoded.error_kind, Some(ErrorKind::BufferExhausted));
        }

        #[test]
        fn encode_json_converts_then_encodes() {
            let inspector = Inspector::default();
            let result = inspector.encode_json(&json!({"flag": true, "count": 300}), &counter());
            assert!(result.is_valid);
            assert_eq!(result.hex, "012c010000");
        }

        #[test]
        fn encode_json_reports_conversion_failures() {
            let schema = Schema::new("Key", Type::primitive(PrimitiveType::Pubkey));
            let result = Inspector::default().encode_json(&json!([1, 2, 3]), &schema);
            assert!(!result.is_valid);
            assert_eq!(result.error_kind, Some(ErrorKind::InvalidKeyLength));

            let result = Inspector::default().encode_json(&json!({"flag": true}), &counter());
            assert_eq!(result.error_kind, Some(ErrorKind::MissingField));
            assert_eq!(result.error.as_deref(), Some("missing field: count"));
        }

        #[test]
        fn serialized_form_skips_raw_buffer() {
            let result = encode(&Value::Pubkey(Pubkey::new([0; 32])), &Schema::new(
                "Key",
                Type::primitive(PrimitiveType::Pubkey),
            ));
            let json = serde_json::to_value(&result).unwrap();
            assert!(json.get("encoded").is_none());
            assert_eq!(json["length"], json!(32));
            assert_eq!(json["isValid"], json!(true));
        }
    }
}
