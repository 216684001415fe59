//! # Byte Reader
//!
//! Bounds-checked, cursor-based consumer of a Borsh byte buffer.
//!
//! Every read checks the remaining length before copying; a short buffer
//! yields `CodecError::UnexpectedEndOfBuffer` carrying the offset and the
//! number of bytes requested. All multi-byte values are little-endian.
//!
//! # Examples
//!
//! ```
//! use borsh_inspect::infrastructure::borsh::ByteReader;
//!
//! let mut reader = ByteReader::new(&[0x01, 0x2c, 0x01, 0x00, 0x00]);
//! assert!(reader.read_bool().unwrap());
//! assert_eq!(reader.read_u32().unwrap(), 300);
//! assert!(reader.is_empty());
//! ```

use crate::domain::errors::{CodecError, CodecResult};
use crate::domain::pubkey::Pubkey;
use crate::domain::schema::PUBKEY_LENGTH;

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Current cursor offset.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    /// Returns true when every byte has been consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if fewer than `len`
    /// bytes remain. The cursor does not move on failure.
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let start = self.offset;
        let bytes = start
            .checked_add(len)
            .and_then(|end| self.buffer.get(start..end))
            .ok_or_else(|| CodecError::end_of_buffer(start, len, self.remaining()))?;
        self.offset += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a `u8`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        self.read_array::<1>().map(u8::from_le_bytes)
    }

    /// Reads a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a `u128` stored as a low word followed by a high word.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_u128(&mut self) -> CodecResult<u128> {
        self.ensure(16)?;
        let low = self.read_u64()?;
        let high = self.read_u64()?;
        Ok((u128::from(high) << 64) | u128::from(low))
    }

    /// Reads an `i8`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_i8(&mut self) -> CodecResult<i8> {
        self.read_array::<1>().map(i8::from_le_bytes)
    }

    /// Reads a little-endian `i16`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_i16(&mut self) -> CodecResult<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a little-endian `i64`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_i64(&mut self) -> CodecResult<i64> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// Reads an `i128` stored as a low word followed by a high word.
    ///
    /// The low word is zero-extended and only the high word carries the
    /// sign, which reproduces the full 128-bit two's-complement value.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_i128(&mut self) -> CodecResult<i128> {
        self.ensure(16)?;
        let low = self.read_u64()?;
        let high = self.read_i64()?;
        Ok((i128::from(high) << 64) | i128::from(low))
    }

    /// Reads a little-endian IEEE-754 `f32`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_f32(&mut self) -> CodecResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads a little-endian IEEE-754 `f64`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_f64(&mut self) -> CodecResult<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Reads one byte as a boolean; any non-zero byte is `true`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a u32 length prefix as a `usize`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_len(&mut self) -> CodecResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Reads a u32-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the prefix or payload
    /// runs past the end of the buffer, and `CodecError::InvalidUtf8` if the
    /// payload is not UTF-8.
    pub fn read_string(&mut self) -> CodecResult<String> {
        let len = self.read_len()?;
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| CodecError::InvalidUtf8 {
                offset: start,
                reason: e.to_string(),
            })
    }

    /// Reads 32 raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnexpectedEndOfBuffer` if the buffer is exhausted.
    pub fn read_pubkey(&mut self) -> CodecResult<Pubkey> {
        self.read_array::<PUBKEY_LENGTH>().map(Pubkey::new)
    }

    fn ensure(&self, len: usize) -> CodecResult<()> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::end_of_buffer(self.offset, len, remaining));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod integers {
        use super::*;

        #[test]
        fn little_endian_widths() {
            let bytes = [
                0xff, // u8
                0x34, 0x12, // u16
                0x78, 0x56, 0x34, 0x12, // u32
                0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, // u64
            ];
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(reader.read_u8().unwrap(), 0xff);
            assert_eq!(reader.read_u16().unwrap(), 0x1234);
            assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
            assert_eq!(reader.read_u64().unwrap(), 0x0102_0304_0506_0708);
            assert_eq!(reader.position(), bytes.len());
        }

        #[test]
        fn signed_values() {
            let mut bytes = Vec::new();
            bytes.push(0x80);
            bytes.extend_from_slice(&(-2i16).to_le_bytes());
            bytes.extend_from_slice(&i32::MIN.to_le_bytes());
            bytes.extend_from_slice(&(-1i64).to_le_bytes());
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(reader.read_i8().unwrap(), -128);
            assert_eq!(reader.read_i16().unwrap(), -2);
            assert_eq!(reader.read_i32().unwrap(), i32::MIN);
            assert_eq!(reader.read_i64().unwrap(), -1);
        }

        #[test]
        fn u128_composes_low_then_high() {
            let value = 0x0011_2233_4455_6677_8899_aabb_ccdd_eeffu128;
            let bytes = value.to_le_bytes();
            assert_eq!(ByteReader::new(&bytes).read_u128().unwrap(), value);
            assert_eq!(
                ByteReader::new(&u128::MAX.to_le_bytes()).read_u128().unwrap(),
                u128::MAX
            );
        }

        #[test]
        fn i128_keeps_twos_complement() {
            for value in [
                0i128,
                -1,
                i128::MIN,
                i128::MAX,
                -(1i128 << 64),
                -(1i128 << 64) - 1,
                -0x7fff_ffff_ffff_ffff,
                i128::from(u64::MAX),
                -i128::from(u64::MAX),
            ] {
                let bytes = value.to_le_bytes();
                assert_eq!(ByteReader::new(&bytes).read_i128().unwrap(), value, "{value}");
            }
        }
    }

    mod floats_and_bools {
        use super::*;

        #[test]
        fn floats() {
            let mut bytes = Vec::new();
            bytes.extend_from_slice(&1.5f32.to_le_bytes());
            bytes.extend_from_slice(&(-0.25f64).to_le_bytes());
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(reader.read_f32().unwrap(), 1.5);
            assert_eq!(reader.read_f64().unwrap(), -0.25);
        }

        #[test]
        fn any_nonzero_byte_is_true() {
            let mut reader = ByteReader::new(&[0, 1, 2, 0xff]);
            assert!(!reader.read_bool().unwrap());
            assert!(reader.read_bool().unwrap());
            assert!(reader.read_bool().unwrap());
            assert!(reader.read_bool().unwrap());
        }
    }

    mod strings_and_keys {
        use super::*;

        #[test]
        fn reads_prefixed_string() {
            let mut bytes = 5u32.to_le_bytes().to_vec();
            bytes.extend_from_slice(b"hello");
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(reader.read_string().unwrap(), "hello");
            assert!(reader.is_empty());
        }

        #[test]
        fn invalid_utf8_reports_payload_offset() {
            let mut bytes = 2u32.to_le_bytes().to_vec();
            bytes.extend_from_slice(&[0xc3, 0x28]);
            let err = ByteReader::new(&bytes).read_string().unwrap_err();
            assert!(matches!(err, CodecError::InvalidUtf8 { offset: 4, .. }));
        }

        #[test]
        fn string_payload_past_end() {
            let mut bytes = 10u32.to_le_bytes().to_vec();
            bytes.extend_from_slice(b"abc");
            let err = ByteReader::new(&bytes).read_string().unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(4, 10, 3));
        }

        #[test]
        fn pubkey_is_32_raw_bytes() {
            let bytes = [7u8; 33];
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(reader.read_pubkey().unwrap(), Pubkey::new([7u8; 32]));
            assert_eq!(reader.remaining(), 1);
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn empty_buffer() {
            let err = ByteReader::new(&[]).read_u8().unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(0, 1, 0));
        }

        #[test]
        fn short_read_reports_offset_and_request() {
            let mut reader = ByteReader::new(&[1, 2, 3, 4, 5]);
            reader.read_u8().unwrap();
            let err = reader.read_u64().unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(1, 8, 4));
            // cursor unchanged after failure
            assert_eq!(reader.position(), 1);
        }

        #[test]
        fn wide_read_fails_before_consuming_low_word() {
            let mut reader = ByteReader::new(&[0u8; 12]);
            let err = reader.read_i128().unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(0, 16, 12));
            assert_eq!(reader.position(), 0);
        }

        #[test]
        fn oversized_request_does_not_overflow() {
            let mut reader = ByteReader::new(&[1, 2, 3]);
            reader.read_u8().unwrap();
            let err = reader.read_bytes(usize::MAX).unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(1, usize::MAX, 2));
            assert_eq!(reader.read_bytes(2).unwrap(), &[2, 3]);
        }

        #[test]
        fn short_pubkey() {
            let err = ByteReader::new(&[0u8; 31]).read_pubkey().unwrap_err();
            assert_eq!(err, CodecError::end_of_buffer(0, 32, 31));
        }
    }
}
