// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `geometry_msgs` types.
//!
//! ```text
//! # geometry_msgs/msg/Vector3
//! float64 x
//! float64 y
//! float64 z
//!
//! # geometry_msgs/msg/Twist
//! Vector3 linear
//! Vector3 angular
//! ```

use serde::{Deserialize, Serialize};

use super::CdrMessage;
use crate::core::Result as CoreResult;
use crate::encoding::cdr::{CdrCursor, CdrEncoder};

/// Three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl CdrMessage for Vector3 {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Vector3";

    fn encode(&self, encoder: &mut CdrEncoder) -> CoreResult<()> {
        encoder.float64(self.x).float64(self.y).float64(self.z);
        Ok(())
    }

    fn decode(cursor: &mut CdrCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            x: cursor.read_f64()?,
            y: cursor.read_f64()?,
            z: cursor.read_f64()?,
        })
    }
}

/// Velocity in free space, split into linear and angular parts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist {
    /// Linear velocity in m/s
    pub linear: Vector3,
    /// Angular velocity in rad/s
    pub angular: Vector3,
}

impl Twist {
    /// Encoded size of a headerless Twist.
    pub const ENCODED_LEN: usize = 48;

    /// A ground-vehicle command: forward speed along x, yaw rate around z.
    /// The other four components are zero.
    pub const fn planar(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear: Vector3::new(linear_x, 0.0, 0.0),
            angular: Vector3::new(0.0, 0.0, angular_z),
        }
    }

    /// All-zero command.
    pub const fn stop() -> Self {
        Self::planar(0.0, 0.0)
    }
}

impl CdrMessage for Twist {
    const TYPE_NAME: &'static str = "geometry_msgs/msg/Twist";

    fn encode(&self, encoder: &mut CdrEncoder) -> CoreResult<()> {
        self.linear.encode(encoder)?;
        self.angular.encode(encoder)
    }

    fn decode(cursor: &mut CdrCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            linear: Vector3::decode(cursor)?,
            angular: Vector3::decode(cursor)?,
        })
    }
}
