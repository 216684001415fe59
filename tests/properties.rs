//! Property tests over randomly generated schemas and instances.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use borsh_inspect::domain::pubkey::Pubkey;
use borsh_inspect::domain::schema::{Field, PrimitiveType, Schema, Type, Variant};
use borsh_inspect::domain::value::Value;
use borsh_inspect::{ErrorKind, decode, encode};
use proptest::prelude::*;
use proptest::strategy::Union;

fn type_strategy() -> impl Strategy<Value = Type> {
    let leaf = proptest::sample::select(PrimitiveType::ALL.to_vec()).prop_map(Type::primitive);

    leaf.prop_recursive(3, 24, 4, |inner| {
        let sized = inner
            .clone()
            .prop_filter("collection item that may be empty", |ty| ty.min_size() != 0);
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|types| {
                Type::structure(
                    types
                        .into_iter()
                        .enumerate()
                        .map(|(i, ty)| Field::new(format!("f{i}"), ty))
                        .collect(),
                )
            }),
            prop::collection::vec(prop::collection::vec(inner.clone(), 0..3), 1..4).prop_map(
                |variants| {
                    Type::enumeration(
                        variants
                            .into_iter()
                            .enumerate()
                            .map(|(i, types)| {
                                let fields = types
                                    .into_iter()
                                    .enumerate()
                                    .map(|(j, ty)| Field::new(format!("f{j}"), ty))
                                    .collect();
                                Variant::with_fields(format!("V{i}"), fields)
                            })
                            .collect(),
                    )
                }
            ),
            (inner.clone(), 0usize..4).prop_map(|(ty, length)| Type::array(ty, length)),
            sized.clone().prop_map(Type::vec),
            inner.clone().prop_map(Type::option),
            (sized.clone(), inner).prop_map(|(key, value)| Type::map(key, value)),
            sized.prop_map(Type::set),
        ]
    })
}

fn primitive_strategy(primitive: PrimitiveType) -> BoxedStrategy<Value> {
    match primitive {
        PrimitiveType::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        PrimitiveType::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        PrimitiveType::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        PrimitiveType::U64 => any::<u64>().prop_map(Value::U64).boxed(),
        PrimitiveType::U128 => any::<u128>().prop_map(Value::U128).boxed(),
        PrimitiveType::I8 => any::<i8>().prop_map(Value::I8).boxed(),
        PrimitiveType::I16 => any::<i16>().prop_map(Value::I16).boxed(),
        PrimitiveType::I32 => any::<i32>().prop_map(Value::I32).boxed(),
        PrimitiveType::I64 => any::<i64>().prop_map(Value::I64).boxed(),
        PrimitiveType::I128 => any::<i128>().prop_map(Value::I128).boxed(),
        PrimitiveType::F32 => (-1.0e6f32..1.0e6).prop_map(Value::F32).boxed(),
        PrimitiveType::F64 => (-1.0e12f64..1.0e12).prop_map(Value::F64).boxed(),
        PrimitiveType::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        PrimitiveType::String => ".{0,12}".prop_map(Value::String).boxed(),
        PrimitiveType::Pubkey => any::<[u8; 32]>()
            .prop_map(|bytes| Value::Pubkey(Pubkey::new(bytes)))
            .boxed(),
    }
}

fn fields_strategy(fields: &[Field]) -> BoxedStrategy<Vec<(String, Value)>> {
    let parts: Vec<BoxedStrategy<(String, Value)>> = fields
        .iter()
        .map(|field| {
            let name = field.name.clone();
            value_strategy(&field.ty)
                .prop_map(move |value| (name.clone(), value))
                .boxed()
        })
        .collect();
    parts.boxed()
}

fn value_strategy(ty: &Type) -> BoxedStrategy<Value> {
    match ty {
        Type::Primitive { primitive } => primitive_strategy(*primitive),
        Type::Struct { fields } => fields_strategy(fields)
            .prop_map(|pairs| Value::Struct(pairs.into_iter().collect()))
            .boxed(),
        Type::Enum { variants } => {
            let options: Vec<BoxedStrategy<Value>> = variants
                .iter()
                .map(|variant| {
                    let name = variant.name.clone();
                    fields_strategy(&variant.fields)
                        .prop_map(move |pairs| Value::variant(name.clone(), pairs))
                        .boxed()
                })
                .collect();
            Union::new(options).boxed()
        }
        Type::Array { element, length } => {
            prop::collection::vec(value_strategy(element), *length)
                .prop_map(Value::Seq)
                .boxed()
        }
        Type::Vec { element } => prop::collection::vec(value_strategy(element), 0..4)
            .prop_map(Value::Seq)
            .boxed(),
        Type::Set { element } => prop::collection::vec(value_strategy(element), 0..4)
            .prop_map(Value::Set)
            .boxed(),
        Type::Option { element } => prop::option::of(value_strategy(element))
            .prop_map(|inner| Value::Option(inner.map(Box::new)))
            .boxed(),
        Type::Map { key, value } => {
            prop::collection::vec((value_strategy(key), value_strategy(value)), 0..3)
                .prop_map(Value::Map)
                .boxed()
        }
    }
}

fn instance_strategy() -> impl Strategy<Value = (Schema, Value)> {
    type_strategy().prop_flat_map(|ty| {
        let values = value_strategy(&ty);
        (Just(Schema::new("Generated", ty)), values)
    })
}

fn integer_struct_strategy() -> impl Strategy<Value = (Schema, Vec<u8>)> {
    let integers = [
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::U128,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::I128,
        PrimitiveType::Pubkey,
    ];
    prop::collection::vec(proptest::sample::select(integers.to_vec()), 1..8).prop_flat_map(
        |primitives| {
            let ty = Type::structure(
                primitives
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| Field::new(format!("f{i}"), Type::primitive(p)))
                    .collect(),
            );
            let size = ty.fixed_size().unwrap();
            (
                Just(Schema::new("Integers", ty)),
                prop::collection::vec(any::<u8>(), size),
            )
        },
    )
}

proptest! {
    #[test]
    fn decode_inverts_encode((schema, value) in instance_strategy()) {
        let encoded = encode(&value, &schema);
        prop_assert!(encoded.is_valid, "encode failed: {:?}", encoded.error);
        prop_assert_eq!(encoded.length, encoded.encoded.len());

        let decoded = decode(&encoded.encoded, &schema);
        prop_assert!(decoded.is_valid, "decode failed: {:?}", decoded.error);
        prop_assert_eq!(decoded.data, Some(value));
        prop_assert_eq!(decoded.bytes_consumed, encoded.length);
        prop_assert_eq!(decoded.trailing_bytes, 0);
    }

    #[test]
    fn reencoding_decoded_bytes_is_stable((schema, value) in instance_strategy()) {
        let bytes = encode(&value, &schema).encoded;
        let decoded = decode(&bytes, &schema).data.unwrap();
        prop_assert_eq!(encode(&decoded, &schema).encoded, bytes);
    }

    #[test]
    fn arbitrary_integer_buffers_are_stable((schema, bytes) in integer_struct_strategy()) {
        let decoded = decode(&bytes, &schema);
        prop_assert!(decoded.is_valid);
        prop_assert_eq!(encode(&decoded.data.unwrap(), &schema).encoded, bytes);
    }

    #[test]
    fn truncated_encodings_fail((schema, value) in instance_strategy()) {
        let bytes = encode(&value, &schema).encoded;
        prop_assume!(!bytes.is_empty());

        let decoded = decode(&bytes[..bytes.len() - 1], &schema);
        prop_assert!(!decoded.is_valid);
        prop_assert!(decoded.data.is_none());
        prop_assert_eq!(decoded.error_kind, Some(ErrorKind::BufferExhausted));
    }

    #[test]
    fn random_input_never_panics(
        ty in type_strategy(),
        bytes in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let schema = Schema::new("Fuzz", ty);
        let decoded = decode(&bytes, &schema);
        prop_assert_eq!(decoded.is_valid, decoded.data.is_some());
        if decoded.is_valid {
            prop_assert_eq!(decoded.bytes_consumed + decoded.trailing_bytes, bytes.len());
        } else {
            prop_assert!(decoded.error.is_some());
        }
    }
}
