//! # Decoded Value Tree
//!
//! The structured form of a Borsh payload, mirroring the schema shape:
//! structs become records, enums become tagged records, arrays and vectors
//! become sequences, options become nullable values and maps/sets keep
//! their entries in wire order.
//!
//! Values carry their exact wire width (`U64` vs `U32`, ...) so that 64- and
//! 128-bit integers never pass through floating point. The JSON bridge
//! ([`Value::to_json`] / [`Value::from_json`]) renders 128-bit integers as
//! decimal strings for the same reason.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::domain::schema::{Field, PrimitiveType, Type};
//! use borsh_inspect::domain::pubkey::PubkeyEncoding;
//! use borsh_inspect::domain::value::Value;
//! use serde_json::json;
//!
//! let ty = Type::structure(vec![
//!     Field::new("flag", Type::primitive(PrimitiveType::Bool)),
//!     Field::new("count", Type::primitive(PrimitiveType::U32)),
//! ]);
//! let value = Value::from_json(&json!({"flag": true, "count": 300}), &ty, PubkeyEncoding::Base58)
//!     .unwrap();
//! assert_eq!(value.get("count"), Some(&Value::U32(300)));
//! assert_eq!(value.to_json(PubkeyEncoding::Base58), json!({"flag": true, "count": 300}));
//! ```

use crate::domain::errors::{CodecError, CodecResult};
use crate::domain::pubkey::{Pubkey, PubkeyEncoding};
use crate::domain::schema::{Field, PrimitiveType, Type};
use serde::{Serialize, Serializer};
use serde_json::Value as Json;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Key under which an enum's variant name appears in its JSON form.
pub const VARIANT_KEY: &str = "variant";

/// A decoded (or to-be-encoded) Borsh value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `u8`.
    U8(u8),
    /// `u16`.
    U16(u16),
    /// `u32`.
    U32(u32),
    /// `u64`.
    U64(u64),
    /// `u128`.
    U128(u128),
    /// `i8`.
    I8(i8),
    /// `i16`.
    I16(i16),
    /// `i32`.
    I32(i32),
    /// `i64`.
    I64(i64),
    /// `i128`.
    I128(i128),
    /// `f32`.
    F32(f32),
    /// `f64`.
    F64(f64),
    /// `bool`.
    Bool(bool),
    /// `string`.
    String(String),
    /// `pubkey`.
    Pubkey(Pubkey),
    /// Struct fields by name.
    Struct(BTreeMap<String, Value>),
    /// Enum variant name plus its fields.
    Enum {
        /// Variant name.
        variant: String,
        /// Variant fields by name.
        fields: BTreeMap<String, Value>,
    },
    /// Elements of an array or vector.
    Seq(Vec<Value>),
    /// Optional value.
    Option(Option<Box<Value>>),
    /// Map entries in wire order.
    Map(Vec<(Value, Value)>),
    /// Set elements in wire order.
    Set(Vec<Value>),
}

impl Value {
    /// Creates a struct value from name/value pairs.
    #[must_use]
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates an enum value without payload.
    #[must_use]
    pub fn unit_variant(variant: impl Into<String>) -> Self {
        Self::Enum {
            variant: variant.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates an enum value carrying fields.
    #[must_use]
    pub fn variant<K, I>(variant: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Enum {
            variant: variant.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Creates a present optional value.
    #[must_use]
    pub fn some(value: Value) -> Self {
        Self::Option(Some(Box::new(value)))
    }

    /// Creates an absent optional value.
    #[must_use]
    pub fn none() -> Self {
        Self::Option(None)
    }

    /// Looks up a struct or enum field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Self::Struct(fields) | Self::Enum { fields, .. } => fields.get(field),
            _ => None,
        }
    }

    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::U128(_) => "u128",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::I128(_) => "i128",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Pubkey(_) => "pubkey",
            Self::Struct(_) => "struct",
            Self::Enum { .. } => "enum",
            Self::Seq(_) => "sequence",
            Self::Option(_) => "option",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
        }
    }

    /// Renders the value as JSON.
    ///
    /// 128-bit integers become decimal strings, non-finite floats become
    /// their textual form, and maps become objects only when every key is a
    /// distinct string (otherwise an array of `[key, value]` pairs).
    #[must_use]
    pub fn to_json(&self, encoding: PubkeyEncoding) -> Json {
        match self {
            Self::U8(v) => Json::from(*v),
            Self::U16(v) => Json::from(*v),
            Self::U32(v) => Json::from(*v),
            Self::U64(v) => Json::from(*v),
            Self::U128(v) => Json::String(v.to_string()),
            Self::I8(v) => Json::from(*v),
            Self::I16(v) => Json::from(*v),
            Self::I32(v) => Json::from(*v),
            Self::I64(v) => Json::from(*v),
            Self::I128(v) => Json::String(v.to_string()),
            Self::F32(v) => float_json(f64::from(*v), v.to_string()),
            Self::F64(v) => float_json(*v, v.to_string()),
            Self::Bool(v) => Json::Bool(*v),
            Self::String(v) => Json::String(v.clone()),
            Self::Pubkey(key) => Json::String(encoding.encode(key)),
            Self::Struct(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json(encoding)))
                    .collect(),
            ),
            Self::Enum { variant, fields } => {
                let mut object: serde_json::Map<String, Json> = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json(encoding)))
                    .collect();
                object.insert(VARIANT_KEY.to_string(), Json::String(variant.clone()));
                Json::Object(object)
            }
            Self::Seq(items) | Self::Set(items) => {
                Json::Array(items.iter().map(|v| v.to_json(encoding)).collect())
            }
            Self::Option(inner) => inner
                .as_ref()
                .map_or(Json::Null, |v| v.to_json(encoding)),
            Self::Map(entries) => {
                let mut seen = BTreeSet::new();
                let unique_string_keys = entries.iter().all(|(k, _)| match k {
                    Self::String(key) => seen.insert(key.as_str()),
                    _ => false,
                });
                if unique_string_keys {
                    Json::Object(
                        entries
                            .iter()
                            .filter_map(|(k, v)| match k {
                                Self::String(key) => Some((key.clone(), v.to_json(encoding))),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    Json::Array(
                        entries
                            .iter()
                            .map(|(k, v)| Json::Array(vec![k.to_json(encoding), v.to_json(encoding)]))
                            .collect(),
                    )
                }
            }
        }
    }

    /// Builds a value from JSON, guided by the schema type.
    ///
    /// Integers are accepted as JSON numbers or decimal strings, public
    /// keys as text in `encoding` or as an array of byte values. Struct
    /// fields absent from the JSON are left out of the result so that the
    /// encoder reports them as missing.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::TypeMismatch` when the JSON shape does not fit
    /// the schema node, `CodecError::InvalidValue` for out-of-range or
    /// unparsable scalars, `CodecError::InvalidKeyLength` for keys that are
    /// not 32 bytes and `CodecError::UnknownVariant` for enum names absent
    /// from the schema.
    pub fn from_json(json: &Json, ty: &Type, encoding: PubkeyEncoding) -> CodecResult<Self> {
        match ty {
            Type::Primitive { primitive } => primitive_from_json(json, *primitive, encoding),
            Type::Struct { fields } => {
                let object = expect_object(json, "struct")?;
                Ok(Self::Struct(fields_from_json(object, fields, encoding)?))
            }
            Type::Enum { variants } => {
                let (name, object) = match json {
                    Json::String(name) => (name.as_str(), None),
                    Json::Object(object) => {
                        let name = object
                            .get(VARIANT_KEY)
                            .and_then(Json::as_str)
                            .ok_or_else(|| CodecError::MissingField(VARIANT_KEY.to_string()))?;
                        (name, Some(object))
                    }
                    other => return Err(CodecError::type_mismatch("enum", json_kind(other))),
                };
                let variant = variants
                    .iter()
                    .find(|v| v.name == name)
                    .ok_or_else(|| CodecError::UnknownVariant(name.to_string()))?;
                let fields = match object {
                    Some(object) => fields_from_json(object, &variant.fields, encoding)?,
                    None => BTreeMap::new(),
                };
                Ok(Self::Enum {
                    variant: variant.name.clone(),
                    fields,
                })
            }
            Type::Array { element, .. } | Type::Vec { element } => {
                Ok(Self::Seq(elements_from_json(json, element, encoding)?))
            }
            Type::Set { element } => Ok(Self::Set(elements_from_json(json, element, encoding)?)),
            Type::Option { element } => match json {
                Json::Null => Ok(Self::none()),
                other => Ok(Self::some(Self::from_json(other, element, encoding)?)),
            },
            Type::Map { key, value } => match json {
                Json::Object(object) => object
                    .iter()
                    .map(|(k, v)| -> CodecResult<(Value, Value)> {
                        Ok((
                            Self::from_json(&Json::String(k.clone()), key, encoding)?,
                            Self::from_json(v, value, encoding)?,
                        ))
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Self::Map),
                Json::Array(pairs) => pairs
                    .iter()
                    .map(|pair| -> CodecResult<(Value, Value)> {
                        match pair.as_array().map(Vec::as_slice) {
                            Some([k, v]) => Ok((
                                Self::from_json(k, key, encoding)?,
                                Self::from_json(v, value, encoding)?,
                            )),
                            _ => Err(CodecError::type_mismatch(
                                "[key, value] pair",
                                json_kind(pair),
                            )),
                        }
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Self::Map),
                other => Err(CodecError::type_mismatch("map", json_kind(other))),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json(PubkeyEncoding::default()).serialize(serializer)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128,
    f32 => F32, f64 => F64, bool => Bool, String => String, Pubkey => Pubkey,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

fn float_json(v: f64, text: String) -> Json {
    serde_json::Number::from_f64(v).map_or(Json::String(text), Json::Number)
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn expect_object<'a>(
    json: &'a Json,
    expected: &str,
) -> CodecResult<&'a serde_json::Map<String, Json>> {
    json.as_object()
        .ok_or_else(|| CodecError::type_mismatch(expected, json_kind(json)))
}

fn fields_from_json(
    object: &serde_json::Map<String, Json>,
    fields: &[Field],
    encoding: PubkeyEncoding,
) -> CodecResult<BTreeMap<String, Value>> {
    let mut out = BTreeMap::new();
    for field in fields {
        if let Some(json) = object.get(&field.name) {
            out.insert(field.name.clone(), Value::from_json(json, &field.ty, encoding)?);
        }
    }
    Ok(out)
}

fn elements_from_json(
    json: &Json,
    element: &Type,
    encoding: PubkeyEncoding,
) -> CodecResult<Vec<Value>> {
    let items = json
        .as_array()
        .ok_or_else(|| CodecError::type_mismatch("array", json_kind(json)))?;
    items
        .iter()
        .map(|item| Value::from_json(item, element, encoding))
        .collect()
}

fn integer_from_json<T>(json: &Json, primitive: PrimitiveType) -> CodecResult<T>
where
    T: TryFrom<i128> + FromStr,
{
    match json {
        Json::Number(n) => {
            let wide = n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .ok_or_else(|| CodecError::invalid_value(format!("{n} is not an integer")))?;
            T::try_from(wide).map_err(|_| {
                CodecError::invalid_value(format!("{wide} is out of range for {primitive}"))
            })
        }
        Json::String(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| CodecError::invalid_value(format!("{s:?} is not a valid {primitive}"))),
        other => Err(CodecError::type_mismatch(primitive.as_str(), json_kind(other))),
    }
}

fn float_from_json(json: &Json, primitive: PrimitiveType) -> CodecResult<f64> {
    match json {
        Json::Number(n) => n
            .as_f64()
            .ok_or_else(|| CodecError::invalid_value(format!("{n} is not a valid {primitive}"))),
        Json::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CodecError::invalid_value(format!("{s:?} is not a valid {primitive}"))),
        other => Err(CodecError::type_mismatch(primitive.as_str(), json_kind(other))),
    }
}

fn primitive_from_json(
    json: &Json,
    primitive: PrimitiveType,
    encoding: PubkeyEncoding,
) -> CodecResult<Value> {
    let value = match primitive {
        PrimitiveType::U8 => Value::U8(integer_from_json(json, primitive)?),
        PrimitiveType::U16 => Value::U16(integer_from_json(json, primitive)?),
        PrimitiveType::U32 => Value::U32(integer_from_json(json, primitive)?),
        PrimitiveType::U64 => Value::U64(integer_from_json(json, primitive)?),
        PrimitiveType::U128 => Value::U128(integer_from_json(json, primitive)?),
        PrimitiveType::I8 => Value::I8(integer_from_json(json, primitive)?),
        PrimitiveType::I16 => Value::I16(integer_from_json(json, primitive)?),
        PrimitiveType::I32 => Value::I32(integer_from_json(json, primitive)?),
        PrimitiveType::I64 => Value::I64(integer_from_json(json, primitive)?),
        PrimitiveType::I128 => Value::I128(integer_from_json(json, primitive)?),
        #[allow(clippy::cast_possible_truncation)]
        PrimitiveType::F32 => Value::F32(float_from_json(json, primitive)? as f32),
        PrimitiveType::F64 => Value::F64(float_from_json(json, primitive)?),
        PrimitiveType::Bool => match json {
            Json::Bool(b) => Value::Bool(*b),
            other => return Err(CodecError::type_mismatch("bool", json_kind(other))),
        },
        PrimitiveType::String => match json {
            Json::String(s) => Value::String(s.clone()),
            other => return Err(CodecError::type_mismatch("string", json_kind(other))),
        },
        PrimitiveType::Pubkey => match json {
            Json::String(text) => Value::Pubkey(encoding.decode(text)?),
            Json::Array(items) => {
                let bytes = items
                    .iter()
                    .map(|item| integer_from_json::<u8>(item, PrimitiveType::U8))
                    .collect::<CodecResult<Vec<u8>>>()?;
                Value::Pubkey(Pubkey::try_from(bytes.as_slice())?)
            }
            other => return Err(CodecError::type_mismatch("pubkey", json_kind(other))),
        },
    };
    Ok(value)
}
