// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed ROS 2 messages over the schema-blind CDR codec.
//!
//! Each type issues the fixed primitive sequence of its message definition,
//! so callers never have to remember field order:
//!
//! - `geometry_msgs/msg/Vector3`, `geometry_msgs/msg/Twist`
//! - `builtin_interfaces/msg/Time`, `rcl_interfaces/msg/Log`

pub mod geometry;
pub mod rcl;

pub use geometry::{Twist, Vector3};
pub use rcl::{Log, LogLevel, Time};

use crate::core::Result as CoreResult;
use crate::encoding::cdr::{CdrCursor, CdrEncoder, EncapsulationKind};

/// A message with a fixed CDR layout.
pub trait CdrMessage: Sized {
    /// Fully qualified ROS 2 type name.
    const TYPE_NAME: &'static str;

    /// Write the fields in declaration order.
    fn encode(&self, encoder: &mut CdrEncoder) -> CoreResult<()>;

    /// Read the fields in declaration order.
    fn decode(cursor: &mut CdrCursor<'_>) -> CoreResult<Self>;

    /// Encode as a headerless payload.
    fn to_cdr(&self) -> CoreResult<Vec<u8>> {
        let mut encoder = CdrEncoder::new();
        self.encode(&mut encoder)?;
        Ok(encoder.finish())
    }

    /// Encode with a leading encapsulation header.
    fn to_cdr_encapsulated(&self, kind: EncapsulationKind) -> CoreResult<Vec<u8>> {
        let mut encoder = CdrEncoder::with_encapsulation(kind);
        self.encode(&mut encoder)?;
        Ok(encoder.finish())
    }

    /// Decode a headerless payload. Trailing bytes are ignored.
    fn from_cdr(data: &[u8]) -> CoreResult<Self> {
        Self::decode(&mut CdrCursor::new(data))
    }

    /// Decode a payload that starts with an encapsulation header.
    fn from_cdr_encapsulated(data: &[u8]) -> CoreResult<Self> {
        Self::decode(&mut CdrCursor::with_encapsulation(data)?)
    }
}
