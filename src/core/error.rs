// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec error types for rosteleop.
//!
//! Every failure the CDR reader can hit surfaces here:
//! - Reads past the end of the payload
//! - String payloads that are not valid UTF-8 or lack their terminator
//! - Malformed encapsulation headers
//!
//! The writer only fails when a string is too long for its u32 prefix.

use std::fmt;

/// Errors that can occur while encoding or decoding CDR payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// String content is not valid UTF-8
    InvalidUtf8 {
        /// Cursor position of the first content byte
        cursor_pos: u64,
        /// Underlying decoder message
        message: String,
    },

    /// String payload is structurally wrong (missing null terminator)
    InvalidString {
        /// Cursor position of the length prefix
        cursor_pos: u64,
        /// What was wrong
        reason: String,
    },

    /// Encapsulation header missing or malformed
    InvalidHeader {
        /// Length of the payload that was offered
        len: usize,
        /// Representation identifier, when the header was present but unsupported
        kind: Option<u16>,
    },

    /// Length does not fit the wire representation or the buffer
    LengthExceeded {
        /// Length that was requested
        length: usize,
        /// Position in buffer
        position: usize,
        /// Limit that was exceeded
        limit: usize,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create an invalid UTF-8 error.
    pub fn invalid_utf8(cursor_pos: u64, message: impl Into<String>) -> Self {
        CodecError::InvalidUtf8 {
            cursor_pos,
            message: message.into(),
        }
    }

    /// Create an invalid string error.
    pub fn invalid_string(cursor_pos: u64, reason: impl Into<String>) -> Self {
        CodecError::InvalidString {
            cursor_pos,
            reason: reason.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(len: usize) -> Self {
        CodecError::InvalidHeader { len, kind: None }
    }

    /// Create an error for a header naming a representation other than
    /// plain CDR.
    pub fn unsupported_encapsulation(len: usize, kind: u16) -> Self {
        CodecError::InvalidHeader {
            len,
            kind: Some(kind),
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, limit: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            position,
            limit,
        }
    }

    /// Whether the error means the payload was cut short.
    pub fn is_truncation(&self) -> bool {
        matches!(self, CodecError::BufferTooShort { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::InvalidUtf8 {
                cursor_pos,
                message,
            } => vec![("cursor", cursor_pos.to_string()), ("message", message.clone())],
            CodecError::InvalidString { cursor_pos, reason } => {
                vec![("cursor", cursor_pos.to_string()), ("reason", reason.clone())]
            }
            CodecError::InvalidHeader { len, kind } => {
                let mut fields = vec![("len", len.to_string())];
                if let Some(kind) = kind {
                    fields.push(("kind", format!("{kind:#06x}")));
                }
                fields
            }
            CodecError::LengthExceeded {
                length,
                position,
                limit,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("limit", limit.to_string()),
            ],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::InvalidUtf8 {
                cursor_pos,
                message,
            } => write!(f, "Invalid UTF-8 in string at position {cursor_pos}: {message}"),
            CodecError::InvalidString { cursor_pos, reason } => {
                write!(f, "Invalid string at position {cursor_pos}: {reason}")
            }
            CodecError::InvalidHeader { len, kind: None } => write!(
                f,
                "Invalid CDR data size {len}, must contain at least a 4-byte header"
            ),
            CodecError::InvalidHeader {
                len,
                kind: Some(kind),
            } => write!(
                f,
                "Unsupported CDR encapsulation {kind:#06x} in {len}-byte payload, expected CDR_BE or CDR_LE"
            ),
            CodecError::LengthExceeded {
                length,
                position,
                limit,
            } => write!(
                f,
                "Length {length} at position {position} exceeds limit {limit}"
            ),
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
