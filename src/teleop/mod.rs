// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Teleoperation bridge.
//!
//! [`Teleop`] turns operator commands into scaled `geometry_msgs/msg/Twist`
//! payloads on the command topic, and renders `rcl_interfaces/msg/Log`
//! records received on the rosout topic. Malformed records are logged and
//! dropped; each one is decoded with its own cursor so a bad payload never
//! affects the next.

pub mod command;

pub use command::TeleopCommand;

use std::io::BufRead;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{OutputFormat, TeleopConfig};
use crate::core::CodecError;
use crate::encoding::cdr::EncapsulationKind;
use crate::messages::{CdrMessage, Log, Twist};
use crate::transport::{SubscriptionId, Transport, TransportError};

/// Errors raised by the bridge.
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    /// A payload failed to encode or decode
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The transport refused an operation
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// JSON rendering failed
    #[error("failed to render log record: {0}")]
    Render(#[from] serde_json::Error),

    /// Reading operator input failed
    #[error("failed to read operator input: {0}")]
    Input(#[from] std::io::Error),

    /// Input did not name a command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

/// Where rendered status lines are written.
pub type StatusSink = Box<dyn Fn(&str) + Send + Sync + 'static>;

/// Factors applied to unit commands before publishing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityScale {
    /// Applied to `linear.x`
    pub linear: f64,
    /// Applied to `angular.z`
    pub angular: f64,
}

impl VelocityScale {
    /// Scale `linear` into `linear.x` and `angular` into `angular.z`.
    pub fn twist(&self, linear: f64, angular: f64) -> Twist {
        Twist::planar(linear * self.linear, angular * self.angular)
    }
}

/// Counters shared with the rosout callback.
#[derive(Debug, Default)]
pub struct TeleopStats {
    published: AtomicU64,
    received: AtomicU64,
    dropped: AtomicU64,
}

impl TeleopStats {
    /// Twist messages published.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Log records decoded and rendered.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    /// Log records dropped because they failed to decode.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Decode a rosout payload and render it in the requested format.
pub fn render_rosout(
    payload: &[u8],
    encapsulated: bool,
    output: OutputFormat,
) -> Result<String, TeleopError> {
    let log = if encapsulated {
        Log::from_cdr_encapsulated(payload)?
    } else {
        Log::from_cdr(payload)?
    };
    Ok(match output {
        OutputFormat::Text => log.status_line(),
        OutputFormat::Json => serde_json::to_string(&log)?,
    })
}

/// The bridge between operator input and the data space.
pub struct Teleop {
    transport: Arc<dyn Transport>,
    cmd_topic: String,
    scale: VelocityScale,
    encapsulation: Option<EncapsulationKind>,
    subscription: Option<SubscriptionId>,
    stats: Arc<TeleopStats>,
}

impl Teleop {
    /// Subscribe to the rosout topic and prepare the command publisher.
    ///
    /// Rendered log records are passed to `sink`, possibly from a transport
    /// thread.
    pub fn new(
        transport: Arc<dyn Transport>,
        config: &TeleopConfig,
        sink: StatusSink,
    ) -> Result<Self, TeleopError> {
        let stats = Arc::new(TeleopStats::default());
        let encapsulated = config.encapsulation;
        let output = config.output;

        info!(topic = %config.rosout_topic, "subscribing");
        let subscription = {
            let stats = Arc::clone(&stats);
            transport.subscribe(
                &config.rosout_topic,
                Box::new(move |key, payload| {
                    match render_rosout(payload, encapsulated, output) {
                        Ok(line) => {
                            stats.received.fetch_add(1, Ordering::Relaxed);
                            sink(&line);
                        }
                        Err(TeleopError::Codec(err)) => {
                            stats.dropped.fetch_add(1, Ordering::Relaxed);
                            warn!(
                                key,
                                error = %err,
                                fields = ?err.log_fields(),
                                "dropping malformed log record"
                            );
                        }
                        Err(err) => {
                            stats.dropped.fetch_add(1, Ordering::Relaxed);
                            warn!(key, error = %err, "dropping log record");
                        }
                    }
                }),
            )?
        };

        info!(topic = %config.cmd_topic, "publishing");
        Ok(Self {
            transport,
            cmd_topic: config.cmd_topic.clone(),
            scale: VelocityScale {
                linear: config.linear_scale,
                angular: config.angular_scale,
            },
            encapsulation: config.encapsulation.then_some(EncapsulationKind::CdrLe),
            subscription: Some(subscription),
            stats,
        })
    }

    /// Shared counters.
    pub fn stats(&self) -> &TeleopStats {
        &self.stats
    }

    /// The scale applied to commands.
    pub fn scale(&self) -> VelocityScale {
        self.scale
    }

    /// Scale and publish a velocity command. Returns the message sent.
    pub fn publish_twist(&self, linear: f64, angular: f64) -> Result<Twist, TeleopError> {
        let twist = self.scale.twist(linear, angular);
        let payload = match self.encapsulation {
            Some(kind) => twist.to_cdr_encapsulated(kind)?,
            None => twist.to_cdr()?,
        };
        self.transport.publish(&self.cmd_topic, &payload)?;
        self.stats.published.fetch_add(1, Ordering::Relaxed);
        debug!(
            linear = twist.linear.x,
            angular = twist.angular.z,
            "published twist"
        );
        Ok(twist)
    }

    /// Act on one command. Returns `false` once the operator asked to quit.
    pub fn handle(&self, command: TeleopCommand) -> Result<bool, TeleopError> {
        match command.velocity() {
            Some((linear, angular)) => {
                self.publish_twist(linear, angular)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read commands line by line until quit or end of input, then publish
    /// a stop command.
    pub fn run<R: BufRead>(&self, input: R) -> Result<(), TeleopError> {
        info!("waiting for commands (arrows/wasd, empty line stops, q quits)");
        for line in input.lines() {
            let line = line?;
            let Some(command) = TeleopCommand::parse(&line) else {
                warn!(input = %line.trim(), "ignoring unknown command");
                continue;
            };
            if !self.handle(command)? {
                break;
            }
        }
        // Stop the robot at exit
        self.publish_twist(0.0, 0.0)?;
        Ok(())
    }

    /// Drop the rosout subscription and close the transport.
    pub fn close(mut self) -> Result<(), TeleopError> {
        if let Some(id) = self.subscription.take() {
            self.transport.unsubscribe(id)?;
        }
        self.transport.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{LogLevel, Time};

    fn log() -> Log {
        Log {
            stamp: Time {
                sec: 1,
                nanosec: 2,
            },
            level: LogLevel::Warn,
            name: "turtlesim".to_string(),
            msg: "hit the wall".to_string(),
            file: "turtle.cpp".to_string(),
            function: "update".to_string(),
            line: 7,
        }
    }

    #[test]
    fn test_velocity_scale() {
        let scale = VelocityScale {
            linear: 2.0,
            angular: 0.5,
        };
        assert_eq!(scale.twist(1.0, -1.0), Twist::planar(2.0, -0.5));
    }

    #[test]
    fn test_render_text() {
        let payload = log().to_cdr().unwrap();
        let line = render_rosout(&payload, false, OutputFormat::Text).unwrap();
        assert_eq!(line, "[1.2] [turtlesim]: hit the wall");
    }

    #[test]
    fn test_render_json() {
        let payload = log().to_cdr().unwrap();
        let line = render_rosout(&payload, false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["name"], "turtlesim");
        assert_eq!(value["level"], "warn");
        assert_eq!(value["stamp"]["sec"], 1);
        assert_eq!(value["line"], 7);
    }

    #[test]
    fn test_render_encapsulated() {
        let payload = log()
            .to_cdr_encapsulated(EncapsulationKind::CdrLe)
            .unwrap();
        let line = render_rosout(&payload, true, OutputFormat::Text).unwrap();
        assert_eq!(line, "[1.2] [turtlesim]: hit the wall");
    }

    #[test]
    fn test_render_truncated() {
        let payload = log().to_cdr().unwrap();
        let err = render_rosout(&payload[..10], false, OutputFormat::Text).unwrap_err();
        assert!(matches!(err, TeleopError::Codec(CodecError::BufferTooShort { .. })));
    }
}
