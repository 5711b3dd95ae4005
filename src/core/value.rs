// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Primitive value types for schema-blind CDR access.
//!
//! [`PrimitiveType`] names a wire primitive;
//! [`CodecValue`] holds one decoded primitive. Together they let callers
//! drive the encoder and cursor from a runtime list of field kinds instead
//! of a hand-written message type.

use serde::{Deserialize, Serialize};

/// A single primitive CDR value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    /// Boolean
    Bool(bool),

    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),

    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),

    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),

    /// UTF-8 string
    String(String),
}

impl CodecValue {
    /// The wire primitive this value encodes as.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            CodecValue::Bool(_) => PrimitiveType::Bool,
            CodecValue::Int8(_) => PrimitiveType::Int8,
            CodecValue::Int16(_) => PrimitiveType::Int16,
            CodecValue::Int32(_) => PrimitiveType::Int32,
            CodecValue::Int64(_) => PrimitiveType::Int64,
            CodecValue::UInt8(_) => PrimitiveType::UInt8,
            CodecValue::UInt16(_) => PrimitiveType::UInt16,
            CodecValue::UInt32(_) => PrimitiveType::UInt32,
            CodecValue::UInt64(_) => PrimitiveType::UInt64,
            CodecValue::Float32(_) => PrimitiveType::Float32,
            CodecValue::Float64(_) => PrimitiveType::Float64,
            CodecValue::String(_) => PrimitiveType::String,
        }
    }
}

/// Wire primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer (`uint8`, `byte`, `char`)
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String
    String,
}
