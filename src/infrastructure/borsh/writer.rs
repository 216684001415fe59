//! # Byte Writer
//!
//! Growable Borsh byte sink mirroring [`ByteReader`](super::ByteReader).
//!
//! Backed by [`BytesMut`]; [`ByteWriter::finish`] freezes the buffer into an
//! immutable [`Bytes`].

use crate::domain::errors::{CodecError, CodecResult};
use crate::domain::schema::PUBKEY_LENGTH;
use bytes::{BufMut, Bytes, BytesMut};

/// Appends little-endian Borsh primitives to a growable buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buffer: BytesMut,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.put_slice(bytes);
    }

    /// Writes a `u8`.
    pub fn write_u8(&mut self, v: u8) {
        self.buffer.put_u8(v);
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, v: u16) {
        self.buffer.put_u16_le(v);
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, v: u32) {
        self.buffer.put_u32_le(v);
    }

    /// Writes a little-endian `u64`.
    pub fn write_u64(&mut self, v: u64) {
        self.buffer.put_u64_le(v);
    }

    /// Writes a `u128` as a low word followed by a high word.
    pub fn write_u128(&mut self, v: u128) {
        self.buffer.put_u128_le(v);
    }

    /// Writes an `i8`.
    pub fn write_i8(&mut self, v: i8) {
        self.buffer.put_i8(v);
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, v: i16) {
        self.buffer.put_i16_le(v);
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, v: i32) {
        self.buffer.put_i32_le(v);
    }

    /// Writes a little-endian `i64`.
    pub fn write_i64(&mut self, v: i64) {
        self.buffer.put_i64_le(v);
    }

    /// Writes an `i128` in two's complement, low word first.
    pub fn write_i128(&mut self, v: i128) {
        self.buffer.put_i128_le(v);
    }

    /// Writes a little-endian IEEE-754 `f32`.
    pub fn write_f32(&mut self, v: f32) {
        self.buffer.put_f32_le(v);
    }

    /// Writes a little-endian IEEE-754 `f64`.
    pub fn write_f64(&mut self, v: f64) {
        self.buffer.put_f64_le(v);
    }

    /// Writes a boolean as `1` or `0`.
    pub fn write_bool(&mut self, v: bool) {
        self.buffer.put_u8(u8::from(v));
    }

    /// Writes a u32 length prefix.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidValue` if `len` does not fit in a u32.
    pub fn write_len(&mut self, len: usize) -> CodecResult<()> {
        let len = u32::try_from(len).map_err(|_| {
            CodecError::invalid_value(format!("length {len} exceeds the u32 prefix"))
        })?;
        self.write_u32(len);
        Ok(())
    }

    /// Writes a u32-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidValue` if the string is longer than
    /// `u32::MAX` bytes.
    pub fn write_string(&mut self, v: &str) -> CodecResult<()> {
        self.write_len(v.len())?;
        self.buffer.put_slice(v.as_bytes());
        Ok(())
    }

    /// Writes 32 raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidKeyLength` unless `key` is exactly 32
    /// bytes long; nothing is written in that case.
    pub fn write_pubkey(&mut self, key: &[u8]) -> CodecResult<()> {
        if key.len() != PUBKEY_LENGTH {
            return Err(CodecError::InvalidKeyLength {
                expected: PUBKEY_LENGTH,
                actual: key.len(),
            });
        }
        self.buffer.put_slice(key);
        Ok(())
    }

    /// Freezes the written bytes.
    #[must_use]
    pub fn finish(self) -> Bytes {
        self.buffer.freeze()
    }
}
