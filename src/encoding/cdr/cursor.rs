// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading CDR-encoded data with proper alignment.

use crate::core::{CodecError, CodecValue, PrimitiveType, Result as CoreResult};

use super::EncapsulationKind;

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// CDR cursor that tracks position and origin for proper alignment.
///
/// Alignment is calculated as `(offset - origin) % size`. The origin is 0
/// for bare payloads and sits just past the header for encapsulated ones.
///
/// Every read checks the padding and the value against the remaining
/// bytes before touching the buffer. A failed read leaves the cursor where
/// it was.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rosteleop::encoding::cdr::CdrCursor;
///
/// let data = vec![0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = CdrCursor::new(&data);
/// assert_eq!(cursor.read_u32()?, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CdrCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether the data uses little endian encoding
    little_endian: bool,
}

impl<'a> CdrCursor<'a> {
    /// Create a cursor over a headerless little-endian payload.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            origin: 0,
            little_endian: true,
        }
    }

    /// Create a cursor over a payload that starts with a CDR encapsulation
    /// header.
    ///
    /// # CDR Header Format
    ///
    /// - Bytes 0-1: Representation identifier, big endian. Only CDR_BE
    ///   (`0x0000`) and CDR_LE (`0x0001`) are accepted.
    /// - Bytes 2-3: Options (unused)
    pub fn with_encapsulation(data: &'a [u8]) -> CoreResult<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(CodecError::invalid_header(data.len()));
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let kind = EncapsulationKind::from_id(id)
            .ok_or_else(|| CodecError::unsupported_encapsulation(data.len(), id))?;

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
            little_endian: kind.is_little_endian(),
        })
    }

    /// Get the current position relative to the data start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Whether multi-byte values are decoded little endian.
    #[inline]
    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    fn padding_for(&self, size: usize) -> usize {
        let alignment = (self.offset - self.origin) % size;
        if alignment > 0 {
            size - alignment
        } else {
            0
        }
    }

    /// Align to the specified boundary, relative to the origin.
    ///
    /// A zero boundary is rejected.
    pub fn align(&mut self, size: usize) -> CoreResult<()> {
        if size == 0 {
            return Err(CodecError::Other(format!(
                "alignment boundary must be non-zero at position {}",
                self.offset
            )));
        }
        let padding = self.padding_for(size);
        if padding > self.remaining() {
            return Err(CodecError::buffer_too_short(
                padding,
                self.remaining(),
                self.offset as u64,
            ));
        }
        self.offset += padding;
        Ok(())
    }

    /// Skip padding for an N-byte scalar and return its bytes.
    fn read_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        let padding = self.padding_for(N);
        if padding + N > self.remaining() {
            return Err(CodecError::buffer_too_short(
                padding + N,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset + padding;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[start..start + N]);
        self.offset = start + N;
        Ok(bytes)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a boolean (any non-zero byte is true).
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> CoreResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> CoreResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> CoreResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> CoreResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a u64 value.
    pub fn read_u64(&mut self) -> CoreResult<u64> {
        let bytes = self.read_array::<8>()?;
        Ok(if self.little_endian {
            u64::from_le_bytes(bytes)
        } else {
            u64::from_be_bytes(bytes)
        })
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> CoreResult<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> CoreResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> CoreResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> CoreResult<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a length-prefixed, null-terminated UTF-8 string.
    ///
    /// The terminator is stripped from the returned value. A zero prefix is
    /// accepted as the empty string.
    pub fn read_string(&mut self) -> CoreResult<String> {
        let start = self.offset;
        let len = self.read_u32()? as usize;

        if len == 0 {
            return Ok(String::new());
        }

        let raw = match self.read_bytes(len) {
            Ok(raw) => raw,
            Err(e) => {
                self.offset = start;
                return Err(e);
            }
        };

        let (content, terminator) = raw.split_at(len - 1);
        if terminator[0] != 0 {
            self.offset = start;
            return Err(CodecError::invalid_string(
                start as u64,
                "missing null terminator",
            ));
        }

        match std::str::from_utf8(content) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => {
                let content_pos = (self.offset - len) as u64;
                self.offset = start;
                Err(CodecError::invalid_utf8(content_pos, e.to_string()))
            }
        }
    }

    /// Read a value of the given primitive type.
    pub fn read_value(&mut self, ty: PrimitiveType) -> CoreResult<CodecValue> {
        Ok(match ty {
            PrimitiveType::Bool => CodecValue::Bool(self.read_bool()?),
            PrimitiveType::Int8 => CodecValue::Int8(self.read_i8()?),
            PrimitiveType::Int16 => CodecValue::Int16(self.read_i16()?),
            PrimitiveType::Int32 => CodecValue::Int32(self.read_i32()?),
            PrimitiveType::Int64 => CodecValue::Int64(self.read_i64()?),
            PrimitiveType::UInt8 => CodecValue::UInt8(self.read_u8()?),
            PrimitiveType::UInt16 => CodecValue::UInt16(self.read_u16()?),
            PrimitiveType::UInt32 => CodecValue::UInt32(self.read_u32()?),
            PrimitiveType::UInt64 => CodecValue::UInt64(self.read_u64()?),
            PrimitiveType::Float32 => CodecValue::Float32(self.read_f32()?),
            PrimitiveType::Float64 => CodecValue::Float64(self.read_f64()?),
            PrimitiveType::String => CodecValue::String(self.read_string()?),
        })
    }
}
