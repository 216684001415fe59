//! # Schema Type Model
//!
//! Data structures describing how a value is laid out as Borsh bytes.
//!
//! A [`Schema`] names a root [`Type`]. Types form a closed tree of
//! primitives and composites (struct, enum, array, vec, option, map, set)
//! that the codec walks without knowing concrete shapes ahead of time.
//!
//! The serde representation matches the JSON schema documents used by the
//! inspector front end:
//!
//! ```text
//! {"name": "Counter", "type": {"kind": "struct", "fields": [
//!     {"name": "count", "type": {"kind": "primitive", "primitiveType": "u32"}}
//! ]}}
//! ```
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::domain::schema::{Field, PrimitiveType, Schema, Type};
//!
//! let schema = Schema::new(
//!     "Counter",
//!     Type::structure(vec![
//!         Field::new("flag", Type::primitive(PrimitiveType::Bool)),
//!         Field::new("count", Type::primitive(PrimitiveType::U32)),
//!     ]),
//! );
//! assert_eq!(schema.ty.fixed_size(), Some(5));
//! ```

use crate::domain::errors::{CodecError, CodecResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a public key on the wire.
pub const PUBKEY_LENGTH: usize = 32;

/// Size of the length prefix in front of strings and collections.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Primitive wire types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Unsigned 128-bit integer.
    U128,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Signed 128-bit integer.
    I128,
    /// IEEE-754 single precision float.
    F32,
    /// IEEE-754 double precision float.
    F64,
    /// Boolean stored as one byte.
    Bool,
    /// UTF-8 string with a u32 length prefix.
    String,
    /// 32 raw public key bytes.
    Pubkey,
}

impl PrimitiveType {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveType; 15] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::U128,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::I128,
        Self::F32,
        Self::F64,
        Self::Bool,
        Self::String,
        Self::Pubkey,
    ];

    /// Encoded size in bytes, or `None` for variable-length kinds.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 => Some(8),
            Self::U128 | Self::I128 => Some(16),
            Self::Pubkey => Some(PUBKEY_LENGTH),
            Self::String => None,
        }
    }

    /// Returns the schema name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Pubkey => "pubkey",
        }
    }

    /// Returns true for the integer kinds.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(
            self,
            Self::F32 | Self::F64 | Self::Bool | Self::String | Self::Pubkey
        )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::UnsupportedKind(s.to_string()))
    }
}

/// A node in the schema type tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Type {
    /// A primitive wire type.
    Primitive {
        /// Primitive kind.
        #[serde(rename = "primitiveType")]
        primitive: PrimitiveType,
    },
    /// Named fields encoded in declaration order.
    Struct {
        /// Ordered fields.
        fields: Vec<Field>,
    },
    /// One-byte discriminant followed by the selected variant's fields.
    Enum {
        /// Ordered variants; the discriminant is the position in this list.
        variants: Vec<Variant>,
    },
    /// Exactly `length` elements, no prefix.
    Array {
        /// Element type.
        #[serde(rename = "elementType")]
        element: Box<Type>,
        /// Fixed element count.
        length: usize,
    },
    /// u32 count followed by that many elements.
    Vec {
        /// Element type.
        #[serde(rename = "elementType")]
        element: Box<Type>,
    },
    /// One-byte presence flag followed by the element when present.
    Option {
        /// Element type.
        #[serde(rename = "elementType")]
        element: Box<Type>,
    },
    /// u32 count followed by that many key/value pairs.
    Map {
        /// Key type.
        #[serde(rename = "keyType")]
        key: Box<Type>,
        /// Value type.
        #[serde(rename = "valueType")]
        value: Box<Type>,
    },
    /// u32 count followed by that many elements.
    Set {
        /// Element type.
        #[serde(rename = "elementType")]
        element: Box<Type>,
    },
}

impl Type {
    /// Creates a primitive type.
    #[must_use]
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::Primitive { primitive }
    }

    /// Creates a struct type.
    #[must_use]
    pub fn structure(fields: Vec<Field>) -> Self {
        Self::Struct { fields }
    }

    /// Creates an enum type.
    #[must_use]
    pub fn enumeration(variants: Vec<Variant>) -> Self {
        Self::Enum { variants }
    }

    /// Creates a fixed-length array type.
    #[must_use]
    pub fn array(element: Type, length: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            length,
        }
    }

    /// Creates a dynamic vector type.
    #[must_use]
    pub fn vec(element: Type) -> Self {
        Self::Vec {
            element: Box::new(element),
        }
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(element: Type) -> Self {
        Self::Option {
            element: Box::new(element),
        }
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a set type.
    #[must_use]
    pub fn set(element: Type) -> Self {
        Self::Set {
            element: Box::new(element),
        }
    }

    /// Returns the `kind` tag of this node.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "primitive",
            Self::Struct { .. } => "struct",
            Self::Enum { .. } => "enum",
            Self::Array { .. } => "array",
            Self::Vec { .. } => "vec",
            Self::Option { .. } => "option",
            Self::Map { .. } => "map",
            Self::Set { .. } => "set",
        }
    }

    /// Returns the fewest bytes any instance of this type occupies on the
    /// wire. Saturates instead of overflowing.
    ///
    /// A result of 0 means instances can be empty, so a decoder cannot use
    /// the input length to bound how many of them it reads.
    #[must_use]
    pub fn min_size(&self) -> usize {
        match self {
            Self::Primitive { primitive } => primitive.fixed_size().unwrap_or(LENGTH_PREFIX_SIZE),
            Self::Struct { fields } => fields_min_size(fields),
            Self::Enum { variants } => variants
                .iter()
                .map(|v| fields_min_size(&v.fields))
                .min()
                .unwrap_or(0)
                .saturating_add(1),
            Self::Array { element, length } => element.min_size().saturating_mul(*length),
            Self::Vec { .. } | Self::Map { .. } | Self::Set { .. } => LENGTH_PREFIX_SIZE,
            Self::Option { .. } => 1,
        }
    }

    /// Returns the encoded size when every instance of this type has the
    /// same length on the wire.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Primitive { primitive } => primitive.fixed_size(),
            Self::Struct { fields } => fields_size(fields),
            Self::Enum { variants } => {
                let mut sizes = variants.iter().map(|v| fields_size(&v.fields));
                let first = sizes.next()??;
                if sizes.all(|s| s == Some(first)) {
                    first.checked_add(1)
                } else {
                    None
                }
            }
            Self::Array { element, length } => element.fixed_size()?.checked_mul(*length),
            Self::Vec { .. } | Self::Option { .. } | Self::Map { .. } | Self::Set { .. } => None,
        }
    }
}

fn fields_min_size(fields: &[Field]) -> usize {
    fields
        .iter()
        .fold(0usize, |acc, f| acc.saturating_add(f.ty.min_size()))
}

fn fields_size(fields: &[Field]) -> Option<usize> {
    fields
        .iter()
        .try_fold(0usize, |acc, f| acc.checked_add(f.ty.fixed_size()?))
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { primitive } => write!(f, "{primitive}"),
            Self::Struct { fields } => write!(f, "struct({} fields)", fields.len()),
            Self::Enum { variants } => write!(f, "enum({} variants)", variants.len()),
            Self::Array { element, length } => write!(f, "[{element}; {length}]"),
            Self::Vec { element } => write!(f, "vec<{element}>"),
            Self::Option { element } => write!(f, "option<{element}>"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Self::Set { element } => write!(f, "set<{element}>"),
        }
    }
}

/// A named field of a struct or enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An enum variant. Its discriminant is its index in the enclosing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Variant {
    /// Variant name.
    pub name: String,
    /// Payload fields, empty for unit variants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Variant {
    /// Creates a variant without payload.
    #[must_use]
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a variant carrying fields.
    #[must_use]
    pub fn with_fields(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A named, typed description of a byte layout.
///
/// Schemas are immutable once built and can be shared across threads and
/// reused for any number of encode/decode calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    /// Schema name.
    pub name: String,
    /// Root type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    /// Creates a schema without description.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedKind` if the document names an
    /// unknown `kind` or `primitiveType`, and `CodecError::InvalidSchema`
    /// for any other structural problem.
    pub fn from_json_str(text: &str) -> CodecResult<Self> {
        serde_json::from_str(text).map_err(schema_error)
    }

    /// Parses a schema from an already-parsed JSON document.
    ///
    /// # Errors
    ///
    /// Same as [`Schema::from_json_str`].
    pub fn from_json_value(value: serde_json::Value) -> CodecResult<Self> {
        serde_json::from_value(value).map_err(schema_error)
    }

    /// Serializes the schema to its JSON document form.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn schema_error(err: serde_json::Error) -> CodecError {
    let message = err.to_string();
    if message.starts_with("unknown variant") {
        let kind = message
            .split('`')
            .nth(1)
            .unwrap_or_default()
            .to_string();
        return CodecError::UnsupportedKind(kind);
    }
    CodecError::InvalidSchema(message)
}
