//! # Borsh Inspect
//!
//! Schema-driven encoding and decoding of Borsh-serialized data.
//!
//! A [`Schema`] describes the layout of a buffer with a small closed set of
//! type kinds: primitives, structs, enums, fixed arrays, vectors, options,
//! maps and sets. The [`Inspector`] walks that description to turn raw bytes
//! into a [`Value`] tree, or a value tree back into bytes, reporting every
//! failure as result data rather than as an error.
//!
//! # Architecture
//!
//! - [`domain`]: type model, value tree and error taxonomy
//! - [`infrastructure`]: byte reader, byte writer and the recursive codec
//! - [`application`]: inspector facade, example schemas and input parsing
//! - [`config`]: layered presentation settings
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::{PrimitiveType, Schema, Type, decode};
//!
//! let schema = Schema::new("Maybe", Type::option(Type::primitive(PrimitiveType::U8)));
//! let result = decode(&[0x01, 0x07], &schema);
//! assert!(result.is_valid);
//! assert_eq!(result.bytes_consumed, 2);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{DecodedResult, EncodedResult, Inspector, decode, encode};
pub use config::InspectorConfig;
pub use domain::{CodecError, ErrorKind, Field, PrimitiveType, Pubkey, Schema, Type, Value, Variant};
