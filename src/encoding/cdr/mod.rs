// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! [`CdrEncoder`] writes and [`CdrCursor`] reads the plain CDR wire format
//! used by ROS 2 messages: little-endian scalars aligned to their natural
//! size and u32 length-prefixed, null-terminated strings. Both are
//! schema-blind; the field order is a contract with the caller.

pub mod cursor;
pub mod encoder;

pub use cursor::{CdrCursor, CDR_HEADER_SIZE};
pub use encoder::{CdrEncoder, EncapsulationKind};
