//! # Borsh Wire Format
//!
//! Little-endian binary encoding driven by a runtime schema.
//!
//! - [`ByteReader`]: bounds-checked cursor over input bytes
//! - [`ByteWriter`]: growable output buffer
//! - [`decode_value`] / [`encode_value`]: recursive schema dispatcher

pub mod codec;
pub mod reader;
pub mod writer;

pub use codec::{decode_value, encode_value};
pub use reader::ByteReader;
pub use writer::ByteWriter;
