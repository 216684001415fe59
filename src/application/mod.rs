//! # Application Layer
//!
//! The inspector facade and the pieces around it.
//!
//! - [`inspector`]: [`Inspector`], [`DecodedResult`], [`EncodedResult`]
//! - [`fixtures`]: built-in example schemas
//! - [`input`]: hex, base64 and text input parsing
//! - [`error`]: [`ApplicationError`]

pub mod error;
pub mod fixtures;
pub mod input;
pub mod inspector;

pub use error::{ApplicationError, ApplicationResult};
pub use input::{ByteSource, parse_bytes};
pub use inspector::{DecodedResult, EncodedResult, Inspector, decode, encode};
