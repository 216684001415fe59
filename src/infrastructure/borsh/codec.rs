//! # Schema-Driven Codec
//!
//! The recursive dispatcher that interprets a [`Type`] tree against a byte
//! stream. [`decode_value`] and [`encode_value`] visit the tree in the same
//! structural order, so anything one produces the other consumes.
//!
//! # Wire Layout
//!
//! ```text
//! primitive  fixed-width little-endian, string = u32 len + UTF-8, pubkey = 32 bytes
//! struct     fields in declaration order, no framing
//! enum       u8 discriminant (variant index) + variant fields
//! array      exactly `length` elements
//! vec / set  u32 count + elements
//! map        u32 count + (key, value) pairs
//! option     u8 flag (0 absent, 1 present) + element when present
//! ```
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::domain::schema::{PrimitiveType, Type};
//! use borsh_inspect::domain::value::Value;
//! use borsh_inspect::infrastructure::borsh::{decode_value, encode_value, ByteReader, ByteWriter};
//!
//! let ty = Type::option(Type::primitive(PrimitiveType::U8));
//!
//! let mut writer = ByteWriter::new();
//! encode_value(&mut writer, &Value::some(Value::U8(7)), &ty).unwrap();
//! assert_eq!(writer.as_slice(), &[1, 7]);
//!
//! let mut reader = ByteReader::new(&[0]);
//! assert_eq!(decode_value(&mut reader, &ty).unwrap(), Value::none());
//! ```

use super::reader::ByteReader;
use super::writer::ByteWriter;
use crate::domain::errors::{CodecError, CodecResult};
use crate::domain::schema::{Field, PrimitiveType, Type};
use crate::domain::value::Value;
use std::collections::BTreeMap;

/// Decodes one value of type `ty` from the reader.
///
/// # Errors
///
/// Returns `CodecError::UnexpectedEndOfBuffer` when the input is truncated,
/// `CodecError::InvalidUtf8` for malformed strings and
/// `CodecError::InvalidDiscriminant` for enum tags without a variant.
pub fn decode_value(reader: &mut ByteReader<'_>, ty: &Type) -> CodecResult<Value> {
    match ty {
        Type::Primitive { primitive } => decode_primitive(reader, *primitive),
        Type::Struct { fields } => decode_fields(reader, fields).map(Value::Struct),
        Type::Enum { variants } => {
            let offset = reader.position();
            let discriminant = reader.read_u8()?;
            let variant = variants.get(usize::from(discriminant)).ok_or_else(|| {
                tracing::trace!(offset, discriminant, "enum discriminant out of range");
                CodecError::InvalidDiscriminant {
                    value: discriminant,
                    max: variants.len().saturating_sub(1),
                }
            })?;
            Ok(Value::Enum {
                variant: variant.name.clone(),
                fields: decode_fields(reader, &variant.fields)?,
            })
        }
        Type::Array { element, length } => {
            check_sized(ty, *length)?;
            check_remaining(reader, ty, *length)?;
            decode_elements(reader, element, *length).map(Value::Seq)
        }
        Type::Vec { element } => {
            let count = reader.read_len()?;
            check_sized(ty, count)?;
            check_remaining(reader, ty, count)?;
            decode_elements(reader, element, count).map(Value::Seq)
        }
        Type::Set { element } => {
            let count = reader.read_len()?;
            check_sized(ty, count)?;
            check_remaining(reader, ty, count)?;
            decode_elements(reader, element, count).map(Value::Set)
        }
        Type::Option { element } => {
            if reader.read_bool()? {
                Ok(Value::some(decode_value(reader, element)?))
            } else {
                Ok(Value::none())
            }
        }
        Type::Map { key, value } => {
            let count = reader.read_len()?;
            check_sized(ty, count)?;
            check_remaining(reader, ty, count)?;
            let mut entries = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                let k = decode_value(reader, key)?;
                let v = decode_value(reader, value)?;
                entries.push((k, v));
            }
            Ok(Value::Map(entries))
        }
    }
}

/// Encodes `value` as type `ty` into the writer.
///
/// # Errors
///
/// Returns `CodecError::MissingField`, `CodecError::UnknownVariant`,
/// `CodecError::ArrayLengthMismatch`, `CodecError::InvalidKeyLength` or
/// `CodecError::TypeMismatch` when the value is not a valid instance of
/// the schema.
pub fn encode_value(writer: &mut ByteWriter, value: &Value, ty: &Type) -> CodecResult<()> {
    match ty {
        Type::Primitive { primitive } => encode_primitive(writer, value, *primitive),
        Type::Struct { fields } => match value {
            Value::Struct(map) => encode_fields(writer, map, fields),
            other => Err(mismatch(ty, other)),
        },
        Type::Enum { variants } => match value {
            Value::Enum { variant, fields } => {
                let (index, schema_variant) = variants
                    .iter()
                    .enumerate()
                    .find(|(_, v)| v.name == *variant)
                    .ok_or_else(|| CodecError::UnknownVariant(variant.clone()))?;
                let discriminant = u8::try_from(index).map_err(|_| {
                    CodecError::invalid_value(format!(
                        "variant {variant} has index {index}, beyond the u8 discriminant"
                    ))
                })?;
                writer.write_u8(discriminant);
                encode_fields(writer, fields, &schema_variant.fields)
            }
            other => Err(mismatch(ty, other)),
        },
        Type::Array { element, length } => match value {
            Value::Seq(items) => {
                if items.len() != *length {
                    return Err(CodecError::ArrayLengthMismatch {
                        expected: *length,
                        actual: items.len(),
                    });
                }
                check_sized(ty, *length)?;
                encode_elements(writer, items, element)
            }
            other => Err(mismatch(ty, other)),
        },
        Type::Vec { element } => match value {
            Value::Seq(items) => {
                check_sized(ty, items.len())?;
                writer.write_len(items.len())?;
                encode_elements(writer, items, element)
            }
            other => Err(mismatch(ty, other)),
        },
        Type::Set { element } => match value {
            Value::Set(items) | Value::Seq(items) => {
                check_sized(ty, items.len())?;
                writer.write_len(items.len())?;
                encode_elements(writer, items, element)
            }
            other => Err(mismatch(ty, other)),
        },
        Type::Option { element } => match value {
            Value::Option(None) => {
                writer.write_u8(0);
                Ok(())
            }
            Value::Option(Some(inner)) => {
                writer.write_u8(1);
                encode_value(writer, inner, element)
            }
            other => Err(mismatch(ty, other)),
        },
        Type::Map { key, value: value_ty } => match value {
            Value::Map(entries) => {
                check_sized(ty, entries.len())?;
                writer.write_len(entries.len())?;
                for (k, v) in entries {
                    encode_value(writer, k, key)?;
                    encode_value(writer, v, value_ty)?;
                }
                Ok(())
            }
            other => Err(mismatch(ty, other)),
        },
    }
}

fn decode_primitive(reader: &mut ByteReader<'_>, primitive: PrimitiveType) -> CodecResult<Value> {
    let value = match primitive {
        PrimitiveType::U8 => Value::U8(reader.read_u8()?),
        PrimitiveType::U16 => Value::U16(reader.read_u16()?),
        PrimitiveType::U32 => Value::U32(reader.read_u32()?),
        PrimitiveType::U64 => Value::U64(reader.read_u64()?),
        PrimitiveType::U128 => Value::U128(reader.read_u128()?),
        PrimitiveType::I8 => Value::I8(reader.read_i8()?),
        PrimitiveType::I16 => Value::I16(reader.read_i16()?),
        PrimitiveType::I32 => Value::I32(reader.read_i32()?),
        PrimitiveType::I64 => Value::I64(reader.read_i64()?),
        PrimitiveType::I128 => Value::I128(reader.read_i128()?),
        PrimitiveType::F32 => Value::F32(reader.read_f32()?),
        PrimitiveType::F64 => Value::F64(reader.read_f64()?),
        PrimitiveType::Bool => Value::Bool(reader.read_bool()?),
        PrimitiveType::String => Value::String(reader.read_string()?),
        PrimitiveType::Pubkey => Value::Pubkey(reader.read_pubkey()?),
    };
    Ok(value)
}

fn encode_primitive(
    writer: &mut ByteWriter,
    value: &Value,
    primitive: PrimitiveType,
) -> CodecResult<()> {
    match (primitive, value) {
        (PrimitiveType::U8, Value::U8(v)) => writer.write_u8(*v),
        (PrimitiveType::U16, Value::U16(v)) => writer.write_u16(*v),
        (PrimitiveType::U32, Value::U32(v)) => writer.write_u32(*v),
        (PrimitiveType::U64, Value::U64(v)) => writer.write_u64(*v),
        (PrimitiveType::U128, Value::U128(v)) => writer.write_u128(*v),
        (PrimitiveType::I8, Value::I8(v)) => writer.write_i8(*v),
        (PrimitiveType::I16, Value::I16(v)) => writer.write_i16(*v),
        (PrimitiveType::I32, Value::I32(v)) => writer.write_i32(*v),
        (PrimitiveType::I64, Value::I64(v)) => writer.write_i64(*v),
        (PrimitiveType::I128, Value::I128(v)) => writer.write_i128(*v),
        (PrimitiveType::F32, Value::F32(v)) => writer.write_f32(*v),
        (PrimitiveType::F64, Value::F64(v)) => writer.write_f64(*v),
        (PrimitiveType::Bool, Value::Bool(v)) => writer.write_bool(*v),
        (PrimitiveType::String, Value::String(v)) => writer.write_string(v)?,
        (PrimitiveType::Pubkey, Value::Pubkey(key)) => writer.write_pubkey(key.as_ref())?,
        (_, other) => {
            return Err(CodecError::type_mismatch(
                primitive.as_str(),
                other.kind_name(),
            ));
        }
    }
    Ok(())
}

fn decode_fields(
    reader: &mut ByteReader<'_>,
    fields: &[Field],
) -> CodecResult<BTreeMap<String, Value>> {
    let mut out = BTreeMap::new();
    for field in fields {
        let value = decode_value(reader, &field.ty)?;
        out.insert(field.name.clone(), value);
    }
    Ok(out)
}

fn encode_fields(
    writer: &mut ByteWriter,
    values: &BTreeMap<String, Value>,
    fields: &[Field],
) -> CodecResult<()> {
    for field in fields {
        let value = values
            .get(&field.name)
            .ok_or_else(|| CodecError::MissingField(field.name.clone()))?;
        encode_value(writer, value, &field.ty)?;
    }
    Ok(())
}

/// Longest array whose elements may encode to zero bytes.
pub const MAX_EMPTY_ARRAY_LENGTH: usize = 1 << 16;

fn item_min_size(collection: &Type) -> usize {
    match collection {
        Type::Array { element, .. } | Type::Vec { element } | Type::Set { element } => {
            element.min_size()
        }
        Type::Map { key, value } => key.min_size().saturating_add(value.min_size()),
        other => other.min_size(),
    }
}

/// Rejects collections whose item count is not bounded by the input:
/// non-empty vec/set/map of items that can encode to nothing, and arrays
/// of such items longer than [`MAX_EMPTY_ARRAY_LENGTH`].
fn check_sized(collection: &Type, count: usize) -> CodecResult<()> {
    if item_min_size(collection) > 0 {
        return Ok(());
    }
    let limit = match collection {
        Type::Array { .. } => MAX_EMPTY_ARRAY_LENGTH,
        _ => 0,
    };
    if count > limit {
        return Err(CodecError::invalid_value(format!(
            "{collection} with {count} items that may occupy no bytes"
        )));
    }
    Ok(())
}

/// Fails before looping when `count` items cannot fit in what is left.
fn check_remaining(reader: &ByteReader<'_>, collection: &Type, count: usize) -> CodecResult<()> {
    let needed = count.saturating_mul(item_min_size(collection));
    let remaining = reader.remaining();
    if needed > remaining {
        return Err(CodecError::end_of_buffer(reader.position(), needed, remaining));
    }
    Ok(())
}

fn decode_elements(
    reader: &mut ByteReader<'_>,
    element: &Type,
    count: usize,
) -> CodecResult<Vec<Value>> {
    // a hostile count must not drive allocation past what the buffer can hold
    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(decode_value(reader, element)?);
    }
    Ok(items)
}

fn encode_elements(writer: &mut ByteWriter, items: &[Value], element: &Type) -> CodecResult<()> {
    items
        .iter()
        .try_for_each(|item| encode_value(writer, item, element))
}

fn mismatch(ty: &Type, value: &Value) -> CodecError {
    CodecError::type_mismatch(ty.kind_name(), value.kind_name())
}
