// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Operator commands.

use std::str::FromStr;

use super::TeleopError;

/// One operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleopCommand {
    /// Drive forward
    Forward,
    /// Drive backward
    Backward,
    /// Turn counter-clockwise
    Left,
    /// Turn clockwise
    Right,
    /// Zero velocity
    Stop,
    /// End the session
    Quit,
}

impl TeleopCommand {
    /// Parse one input line.
    ///
    /// Accepts words (`up`, `left`, `stop`, `quit`, ...), WASD letters and
    /// the ANSI escape sequences a terminal echoes for the arrow keys. An
    /// empty line or a lone space means stop; a lone ESC means quit.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            return Some(TeleopCommand::Stop);
        }

        match trimmed {
            "\u{1b}[A" | "\u{1b}OA" => return Some(TeleopCommand::Forward),
            "\u{1b}[B" | "\u{1b}OB" => return Some(TeleopCommand::Backward),
            "\u{1b}[C" | "\u{1b}OC" => return Some(TeleopCommand::Right),
            "\u{1b}[D" | "\u{1b}OD" => return Some(TeleopCommand::Left),
            "\u{1b}" => return Some(TeleopCommand::Quit),
            _ => {}
        }

        match trimmed.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "forward" => Some(TeleopCommand::Forward),
            "down" | "s" | "back" | "backward" => Some(TeleopCommand::Backward),
            "left" | "a" => Some(TeleopCommand::Left),
            "right" | "d" => Some(TeleopCommand::Right),
            "stop" | "space" | "x" => Some(TeleopCommand::Stop),
            "quit" | "q" | "esc" | "exit" => Some(TeleopCommand::Quit),
            _ => None,
        }
    }

    /// Unscaled `(linear, angular)` velocity, or `None` for [`TeleopCommand::Quit`].
    pub const fn velocity(self) -> Option<(f64, f64)> {
        match self {
            TeleopCommand::Forward => Some((1.0, 0.0)),
            TeleopCommand::Backward => Some((-1.0, 0.0)),
            TeleopCommand::Left => Some((0.0, 1.0)),
            TeleopCommand::Right => Some((0.0, -1.0)),
            TeleopCommand::Stop => Some((0.0, 0.0)),
            TeleopCommand::Quit => None,
        }
    }
}

impl FromStr for TeleopCommand {
    type Err = TeleopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TeleopError::UnknownCommand(s.trim().to_string()))
    }
}
