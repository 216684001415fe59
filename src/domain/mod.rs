//! # Domain Layer
//!
//! The type model and value tree the codec works against.
//!
//! - [`schema`]: [`Type`], [`Schema`] and their JSON form
//! - [`value`]: [`Value`], the decoded data tree, and its JSON bridge
//! - [`pubkey`]: 32-byte public keys and their text encodings
//! - [`errors`]: [`CodecError`] and its [`ErrorKind`] classification

pub mod errors;
pub mod pubkey;
pub mod schema;
pub mod value;

pub use errors::{CodecError, CodecResult, ErrorKind};
pub use pubkey::{Pubkey, PubkeyEncoding};
pub use schema::{Field, PrimitiveType, Schema, Type, Variant};
pub use value::Value;
