// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bridge configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional TOML file, and command-line overrides ([`ConfigOverrides`]).
//! Unknown keys are rejected.
//!
//! ```toml
//! cmd_topic = "/rt/turtle1/cmd_vel"
//! rosout_topic = "/rt/rosout"
//! linear_scale = 2.0
//! angular_scale = 2.0
//! encapsulation = false
//! output = "text"
//!
//! [log]
//! level = "info"
//! format = "compact"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::transport::keyexpr;

/// Default topic for velocity commands.
pub const DEFAULT_CMD_TOPIC: &str = "/rt/turtle1/cmd_vel";
/// Default topic for log records.
pub const DEFAULT_ROSOUT_TOPIC: &str = "/rt/rosout";
/// Default scale applied to both velocity components.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or had unknown keys
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rendering of received log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[sec.nanosec] [name]: msg`
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

/// Diagnostic log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable events
    #[default]
    Compact,
    /// Newline-delimited JSON events
    Json,
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format on stderr.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Full bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TeleopConfig {
    /// Topic velocity commands are published on.
    pub cmd_topic: String,
    /// Topic log records are received from.
    pub rosout_topic: String,
    /// Factor applied to the unit forward/backward command.
    pub linear_scale: f64,
    /// Factor applied to the unit turn command.
    pub angular_scale: f64,
    /// Prefix payloads with a CDR encapsulation header and expect one on
    /// received payloads.
    pub encapsulation: bool,
    /// Rendering of received log records.
    pub output: OutputFormat,
    /// Diagnostic logging.
    pub log: LoggingConfig,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            cmd_topic: DEFAULT_CMD_TOPIC.to_string(),
            rosout_topic: DEFAULT_ROSOUT_TOPIC.to_string(),
            linear_scale: DEFAULT_SCALE,
            angular_scale: DEFAULT_SCALE,
            encapsulation: false,
            output: OutputFormat::default(),
            log: LoggingConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `cmd_topic`
    pub cmd_topic: Option<String>,
    /// Replaces `rosout_topic`
    pub rosout_topic: Option<String>,
    /// Replaces `linear_scale`
    pub linear_scale: Option<f64>,
    /// Replaces `angular_scale`
    pub angular_scale: Option<f64>,
    /// Replaces `encapsulation`
    pub encapsulation: Option<bool>,
    /// Replaces `output`
    pub output: Option<OutputFormat>,
    /// Replaces `log.level`
    pub log_level: Option<String>,
    /// Replaces `log.format`
    pub log_format: Option<LogFormat>,
}

impl TeleopConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Load `path` if given, otherwise start from defaults; then apply the
    /// overrides and validate.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(topic) = overrides.cmd_topic {
            self.cmd_topic = topic;
        }
        if let Some(topic) = overrides.rosout_topic {
            self.rosout_topic = topic;
        }
        if let Some(scale) = overrides.linear_scale {
            self.linear_scale = scale;
        }
        if let Some(scale) = overrides.angular_scale {
            self.angular_scale = scale;
        }
        if let Some(encapsulation) = overrides.encapsulation {
            self.encapsulation = encapsulation;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(level) = overrides.log_level {
            self.log.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.log.format = format;
        }
    }

    /// Check topics and scales.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !keyexpr::is_valid(&self.cmd_topic) || self.cmd_topic.contains('*') {
            return Err(ConfigError::Invalid(format!(
                "cmd_topic '{}' is not a concrete key",
                self.cmd_topic
            )));
        }
        if !keyexpr::is_valid(&self.rosout_topic) {
            return Err(ConfigError::Invalid(format!(
                "rosout_topic '{}' is not a valid key expression",
                self.rosout_topic
            )));
        }
        for (name, scale) in [
            ("linear_scale", self.linear_scale),
            ("angular_scale", self.angular_scale),
        ] {
            if !scale.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite, got {scale}"
                )));
            }
        }
        Ok(())
    }
}
