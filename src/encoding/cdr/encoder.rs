// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder for writing CDR-encoded data.
//!
//! Payloads are headerless by default, the shape expected by a pub/sub
//! data space carrying raw ROS 2 messages. [`CdrEncoder::with_encapsulation`]
//! prepends the 4-byte RTPS encapsulation header for peers that expect it.

use super::CDR_HEADER_SIZE;
use crate::core::{CodecError, CodecValue, Result as CoreResult};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// CDR encapsulation kind written into byte 1 of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EncapsulationKind {
    /// CDR, Big Endian
    CdrBe = 0x00,
    /// CDR, Little Endian
    #[default]
    CdrLe = 0x01,
}

impl EncapsulationKind {
    /// Check if this encapsulation uses little endian byte order.
    #[must_use]
    pub const fn is_little_endian(self) -> bool {
        matches!(self, Self::CdrLe)
    }

    /// Resolve the kind from the big-endian representation identifier in
    /// header bytes 0-1. Parameter-list and XCDR2 representations align
    /// differently and are not accepted.
    #[must_use]
    pub const fn from_id(id: u16) -> Option<Self> {
        match id {
            0x0000 => Some(Self::CdrBe),
            0x0001 => Some(Self::CdrLe),
            _ => None,
        }
    }
}

/// CDR encoder for writing CDR-encoded data.
///
/// Every scalar is aligned to its natural size, measured from the origin
/// (the start of the payload, after the header if one was written). Zero
/// bytes are inserted as padding.
///
/// # Example
///
/// ```
/// use rosteleop::encoding::cdr::CdrEncoder;
///
/// let mut encoder = CdrEncoder::new();
/// encoder.uint8(1).int32(42);
/// encoder.string("hello").unwrap();
/// let data = encoder.finish();
/// assert_eq!(data.len(), 18);
/// ```
#[derive(Debug, Clone)]
pub struct CdrEncoder {
    /// Output buffer; its length is the write position
    buffer: Vec<u8>,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether to use little endian encoding
    little_endian: bool,
    /// Encapsulation header, if one was written
    kind: Option<EncapsulationKind>,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrEncoder {
    /// Create a new headerless little-endian encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new headerless little-endian encoder with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            origin: 0,
            little_endian: true,
            kind: None,
        }
    }

    /// Create an encoder that starts with a CDR encapsulation header.
    #[must_use]
    pub fn with_encapsulation(kind: EncapsulationKind) -> Self {
        let mut buffer = Vec::with_capacity(DEFAULT_CAPACITY);
        buffer.extend_from_slice(&[0x00, kind as u8, 0x00, 0x00]);

        Self {
            buffer,
            origin: CDR_HEADER_SIZE,
            little_endian: kind.is_little_endian(),
            kind: Some(kind),
        }
    }

    /// Get the encapsulation kind, if a header was written.
    #[must_use]
    pub const fn kind(&self) -> Option<EncapsulationKind> {
        self.kind
    }

    /// Get the current size of the encoded data, header included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Reset the encoder to write a new message.
    ///
    /// Keeps the allocation and the encapsulation header.
    pub fn reset(&mut self) {
        self.buffer.truncate(self.origin);
    }

    /// Append zero padding until the position is a multiple of `size`
    /// relative to the origin.
    fn align(&mut self, size: usize) {
        let alignment = (self.buffer.len() - self.origin) % size;
        if alignment > 0 {
            let padding = size - alignment;
            self.buffer.resize(self.buffer.len() + padding, 0);
        }
    }

    fn write_aligned(&mut self, bytes: &[u8]) {
        self.align(bytes.len());
        self.buffer.extend_from_slice(bytes);
    }

    /// Write a boolean as a single byte.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.buffer.push(u8::from(value));
        self
    }

    /// Write an 8-bit signed integer.
    pub fn int8(&mut self, value: i8) -> &mut Self {
        self.buffer.push(value as u8);
        self
    }

    /// Write an 8-bit unsigned integer (a raw byte).
    pub fn uint8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    /// Write a 16-bit signed integer.
    pub fn int16(&mut self, value: i16) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 16-bit unsigned integer.
    pub fn uint16(&mut self, value: u16) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 32-bit signed integer.
    pub fn int32(&mut self, value: i32) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 32-bit unsigned integer.
    pub fn uint32(&mut self, value: u32) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 64-bit signed integer.
    pub fn int64(&mut self, value: i64) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 64-bit unsigned integer.
    pub fn uint64(&mut self, value: u64) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 32-bit float.
    pub fn float32(&mut self, value: f32) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a 64-bit double.
    pub fn float64(&mut self, value: f64) -> &mut Self {
        let bytes = if self.little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write_aligned(&bytes);
        self
    }

    /// Write a string.
    ///
    /// The u32 length prefix counts the content plus the null terminator and
    /// is aligned to 4; the content itself is not aligned.
    pub fn string(&mut self, value: &str) -> CoreResult<&mut Self> {
        let strlen = value.len();
        let prefix = u32::try_from(strlen + 1).map_err(|_| {
            CodecError::length_exceeded(strlen + 1, self.buffer.len(), u32::MAX as usize)
        })?;
        self.uint32(prefix);
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
        Ok(self)
    }

    /// Write a dynamically typed value.
    pub fn value(&mut self, value: &CodecValue) -> CoreResult<&mut Self> {
        match value {
            CodecValue::Bool(v) => self.bool(*v),
            CodecValue::Int8(v) => self.int8(*v),
            CodecValue::Int16(v) => self.int16(*v),
            CodecValue::Int32(v) => self.int32(*v),
            CodecValue::Int64(v) => self.int64(*v),
            CodecValue::UInt8(v) => self.uint8(*v),
            CodecValue::UInt16(v) => self.uint16(*v),
            CodecValue::UInt32(v) => self.uint32(*v),
            CodecValue::UInt64(v) => self.uint64(*v),
            CodecValue::Float32(v) => self.float32(*v),
            CodecValue::Float64(v) => self.float64(*v),
            CodecValue::String(v) => return self.string(v),
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_new() {
        let encoder = CdrEncoder::new();
        assert_eq!(encoder.size(), 0);
        assert!(encoder.kind().is_none());
        assert!(encoder.data().is_empty());
    }

    #[test]
    fn test_encoder_uint8() {
        let mut encoder = CdrEncoder::new();
        encoder.uint8(0x42).uint8(0xFF);
        assert_eq!(encoder.data(), &[0x42, 0xFF]);
    }

    #[test]
    fn test_encoder_int32() {
        let mut encoder = CdrEncoder::new();
        encoder.int32(-2);
        assert_eq!(encoder.data(), &[0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encoder_uint32() {
        let mut encoder = CdrEncoder::new();
        encoder.uint32(0x1234_5678);
        assert_eq!(encoder.data(), &[0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_encoder_float64() {
        let mut encoder = CdrEncoder::new();
        encoder.float64(1.0);
        assert_eq!(encoder.data(), &1.0f64.to_le_bytes());
    }

    #[test]
    fn test_encoder_int16() {
        let mut encoder = CdrEncoder::new();
        encoder.int16(-300);
        // -300 in little-endian: 0xD4, 0xFE
        assert_eq!(encoder.data(), &[0xD4, 0xFE]);
    }

    #[test]
    fn test_encoder_string() {
        let mut encoder = CdrEncoder::new();
        encoder.string("hello").unwrap();
        // 4 (length) + 5 + 1 (null) = 10
        assert_eq!(
            encoder.data(),
            &[0x06, 0x00, 0x00, 0x00, b'h', b'e', b'l', b'l', b'o', 0x00]
        );
    }

    #[test]
    fn test_encoder_empty_string() {
        let mut encoder = CdrEncoder::new();
        encoder.string("").unwrap();
        assert_eq!(encoder.data(), &[0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encoder_alignment_padding_is_zero() {
        let mut encoder = CdrEncoder::new();
        encoder.uint8(0xAA).uint32(2);
        assert_eq!(encoder.data(), &[0xAA, 0, 0, 0, 0x02, 0, 0, 0]);

        let mut encoder = CdrEncoder::new();
        encoder.uint8(1).float64(0.0);
        assert_eq!(encoder.size(), 16);
        assert!(encoder.data()[1..8].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encoder_string_content_unaligned() {
        let mut encoder = CdrEncoder::new();
        encoder.uint8(7);
        encoder.string("ab").unwrap();
        // 1 + 3 padding + 4 prefix + 2 content + 1 null
        assert_eq!(encoder.size(), 11);
        assert_eq!(&encoder.data()[4..8], &3u32.to_le_bytes());
    }

    #[test]
    fn test_encapsulation_header() {
        let mut encoder = CdrEncoder::with_encapsulation(EncapsulationKind::CdrLe);
        assert_eq!(encoder.data(), &[0x00, 0x01, 0x00, 0x00]);
        // Alignment is relative to the end of the header
        encoder.float64(1.0);
        assert_eq!(encoder.size(), 12);
    }

    #[test]
    fn test_encapsulation_big_endian() {
        let mut encoder = CdrEncoder::with_encapsulation(EncapsulationKind::CdrBe);
        encoder.uint32(1);
        assert_eq!(encoder.data(), &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(encoder.kind(), Some(EncapsulationKind::CdrBe));
    }

    #[test]
    fn test_kind_from_id() {
        assert_eq!(EncapsulationKind::from_id(0x0001), Some(EncapsulationKind::CdrLe));
        assert_eq!(EncapsulationKind::from_id(0x0000), Some(EncapsulationKind::CdrBe));
        // PL_CDR_LE and CDR2_LE
        assert_eq!(EncapsulationKind::from_id(0x0003), None);
        assert_eq!(EncapsulationKind::from_id(0x0007), None);
        assert_eq!(EncapsulationKind::from_id(0x0101), None);
    }

    #[test]
    fn test_reset_keeps_header() {
        let mut encoder = CdrEncoder::with_encapsulation(EncapsulationKind::CdrLe);
        encoder.uint32(5);
        encoder.reset();
        assert_eq!(encoder.data(), &[0x00, 0x01, 0x00, 0x00]);

        let mut encoder = CdrEncoder::new();
        encoder.uint32(5);
        encoder.reset();
        assert_eq!(encoder.size(), 0);
    }

    #[test]
    fn test_value_dispatch() {
        let mut encoder = CdrEncoder::new();
        encoder.value(&CodecValue::UInt8(3)).unwrap();
        encoder.value(&CodecValue::Int32(-1)).unwrap();
        encoder
            .value(&CodecValue::String("x".to_string()))
            .unwrap();
        assert_eq!(
            encoder.data(),
            &[3, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 2, 0, 0, 0, b'x', 0]
        );
    }
}
