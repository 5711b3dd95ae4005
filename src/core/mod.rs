// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rosteleop.
//!
//! - [`CodecError`] - Codec error handling
//! - [`CodecValue`] / [`PrimitiveType`] - Schema-blind primitive values

pub mod error;
pub mod value;

pub use error::{CodecError, Result};
pub use value::{CodecValue, PrimitiveType};
