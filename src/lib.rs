// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rosteleop
//!
//! Teleoperation bridge for ROS 2 robots reachable over a publish/subscribe
//! data space.
//!
//! - **CDR codec** in [`encoding::cdr`]: [`CdrEncoder`] and [`CdrCursor`]
//! - **Typed messages** in [`messages`]: `Twist`, `Log` and their parts
//! - **Transport seam** in [`transport`]: the [`Transport`] trait and an
//!   in-process [`LoopbackTransport`]
//! - **Bridge** in [`teleop`]: operator commands in, velocity commands out,
//!   rosout records rendered
//!
//! ## Example: encoding a velocity command
//!
//! ```
//! use rosteleop::messages::{CdrMessage, Twist};
//!
//! let payload = Twist::planar(2.0, 0.0).to_cdr().unwrap();
//! assert_eq!(payload.len(), 48);
//! let decoded = Twist::from_cdr(&payload).unwrap();
//! assert_eq!(decoded.linear.x, 2.0);
//! ```

#![warn(missing_docs)]

// Core types
pub mod core;

pub use core::{CodecError, CodecValue, PrimitiveType, Result};

// Encoding/decoding
pub mod encoding;

pub use encoding::cdr::{CdrCursor, CdrEncoder, EncapsulationKind};

// Message types
pub mod messages;

pub use messages::{CdrMessage, Log, LogLevel, Time, Twist, Vector3};

// Configuration and logging
pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigOverrides, TeleopConfig};

// Transport and bridge
pub mod teleop;
pub mod transport;

pub use teleop::{Teleop, TeleopCommand, TeleopError};
pub use transport::{LoopbackTransport, Transport, TransportError};
