// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `builtin_interfaces/msg/Time` and `rcl_interfaces/msg/Log`.
//!
//! ```text
//! # builtin_interfaces/msg/Time
//! int32 sec
//! uint32 nanosec
//!
//! # rcl_interfaces/msg/Log
//! builtin_interfaces/Time stamp
//! uint8 level
//! string name
//! string msg
//! string file
//! string function
//! uint32 line
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CdrMessage;
use crate::core::Result as CoreResult;
use crate::encoding::cdr::{CdrCursor, CdrEncoder};

/// Timestamp with seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    /// Seconds since the epoch
    pub sec: i32,
    /// Nanoseconds within the second
    pub nanosec: u32,
}

impl CdrMessage for Time {
    const TYPE_NAME: &'static str = "builtin_interfaces/msg/Time";

    fn encode(&self, encoder: &mut CdrEncoder) -> CoreResult<()> {
        encoder.int32(self.sec).uint32(self.nanosec);
        Ok(())
    }

    fn decode(cursor: &mut CdrCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            sec: cursor.read_i32()?,
            nanosec: cursor.read_u32()?,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.sec, self.nanosec)
    }
}

/// Severity of a rosout record.
///
/// Values outside the five defined levels are kept as [`LogLevel::Unknown`]
/// so the byte survives a decode/encode cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// `DEBUG` (10)
    Debug,
    /// `INFO` (20)
    Info,
    /// `WARN` (30)
    Warn,
    /// `ERROR` (40)
    Error,
    /// `FATAL` (50)
    Fatal,
    /// Any other byte
    Unknown(u8),
}

impl LogLevel {
    /// Map a wire byte to a level. Undefined values become [`LogLevel::Unknown`].
    pub const fn from_u8(value: u8) -> Self {
        match value {
            10 => LogLevel::Debug,
            20 => LogLevel::Info,
            30 => LogLevel::Warn,
            40 => LogLevel::Error,
            50 => LogLevel::Fatal,
            other => LogLevel::Unknown(other),
        }
    }

    /// The wire byte for this level.
    pub const fn as_u8(self) -> u8 {
        match self {
            LogLevel::Debug => 10,
            LogLevel::Info => 20,
            LogLevel::Warn => 30,
            LogLevel::Error => 40,
            LogLevel::Fatal => 50,
            LogLevel::Unknown(other) => other,
        }
    }
}

impl From<u8> for LogLevel {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => f.write_str("DEBUG"),
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Warn => f.write_str("WARN"),
            LogLevel::Error => f.write_str("ERROR"),
            LogLevel::Fatal => f.write_str("FATAL"),
            LogLevel::Unknown(level) => write!(f, "LEVEL({level})"),
        }
    }
}

/// A record published on `/rosout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// When the record was emitted
    pub stamp: Time,
    /// Severity
    pub level: LogLevel,
    /// Name of the emitting logger, usually the node name
    pub name: String,
    /// Message text
    pub msg: String,
    /// Source file of the log call
    pub file: String,
    /// Function of the log call
    pub function: String,
    /// Source line of the log call
    pub line: u32,
}

impl Log {
    /// One-line status rendering: `[sec.nanosec] [name]: msg`.
    pub fn status_line(&self) -> String {
        format!("[{}] [{}]: {}", self.stamp, self.name, self.msg)
    }
}

impl CdrMessage for Log {
    const TYPE_NAME: &'static str = "rcl_interfaces/msg/Log";

    fn encode(&self, encoder: &mut CdrEncoder) -> CoreResult<()> {
        self.stamp.encode(encoder)?;
        encoder.uint8(self.level.as_u8());
        encoder
            .string(&self.name)?
            .string(&self.msg)?
            .string(&self.file)?
            .string(&self.function)?
            .uint32(self.line);
        Ok(())
    }

    fn decode(cursor: &mut CdrCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            stamp: Time::decode(cursor)?,
            level: LogLevel::from_u8(cursor.read_u8()?),
            name: cursor.read_string()?,
            msg: cursor.read_string()?,
            file: cursor.read_string()?,
            function: cursor.read_string()?,
            line: cursor.read_u32()?,
        })
    }
}
