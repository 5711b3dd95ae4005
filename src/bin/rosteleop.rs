// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rosteleop CLI
//!
//! Drive a ROS 2 robot from the keyboard and watch its rosout.
//!
//! ## Usage
//!
//! ```sh
//! # Defaults: /rt/turtle1/cmd_vel, /rt/rosout, scales of 2.0
//! rosteleop
//!
//! # Slower turns, JSON status lines, settings from a file
//! rosteleop -c teleop.toml -a 0.5 --output json
//! ```
//!
//! Type a command and press Enter: arrow keys or `w`/`a`/`s`/`d` move, an
//! empty line stops, `q` or ESC quits. A stop command is always sent on
//! exit.
//!
//! The binary is loopback-only: commands and log records travel over an
//! in-process transport with no network peers. Published commands are
//! echoed back and logged.

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use rosteleop::config::{ConfigOverrides, LogFormat, OutputFormat, TeleopConfig};
use rosteleop::messages::{CdrMessage, Twist};
use rosteleop::{logging, LoopbackTransport, Teleop, Transport};

/// rosteleop - keyboard teleoperation for ROS 2
#[derive(Parser, Clone, Debug)]
#[command(name = "rosteleop")]
#[command(about = "Publish Twist commands and print rosout records (in-process loopback transport only)", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// A configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// The 'cmd_vel' ROS 2 topic
    #[arg(long = "cmd-vel", visible_alias = "cmd_vel", value_name = "KEY")]
    cmd_topic: Option<String>,

    /// The 'rosout' ROS 2 topic
    #[arg(long = "rosout", value_name = "KEY")]
    rosout_topic: Option<String>,

    /// The angular scale
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    angular_scale: Option<f64>,

    /// The linear scale
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    linear_scale: Option<f64>,

    /// Prefix payloads with a CDR encapsulation header
    #[arg(long)]
    encapsulation: bool,

    /// Status line format
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Diagnostic log format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cmd_topic: self.cmd_topic.clone(),
            rosout_topic: self.rosout_topic.clone(),
            linear_scale: self.linear_scale,
            angular_scale: self.angular_scale,
            encapsulation: self.encapsulation.then_some(true),
            output: self.output,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

/// Decode a command seen on the echo subscription.
fn decode_echo(payload: &[u8], encapsulated: bool) -> rosteleop::Result<Twist> {
    if encapsulated {
        Twist::from_cdr_encapsulated(payload)
    } else {
        Twist::from_cdr(payload)
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = TeleopConfig::resolve(cli.config.as_deref(), cli.overrides())
        .context("loading configuration")?;

    logging::init(&config.log).context("initialising logging")?;

    info!("opening loopback transport");
    let transport = Arc::new(LoopbackTransport::new());

    // Echo commands back so the loopback session shows what was sent
    let encapsulated = config.encapsulation;
    transport.subscribe(
        &config.cmd_topic,
        Box::new(move |key, payload| {
            match decode_echo(payload, encapsulated) {
                Ok(twist) => info!(
                    key,
                    linear = twist.linear.x,
                    angular = twist.angular.z,
                    "cmd_vel"
                ),
                Err(err) => debug!(
                    key,
                    error = %err,
                    fields = ?err.log_fields(),
                    "undecodable cmd_vel echo"
                ),
            }
        }),
    )?;

    let teleop = Teleop::new(
        transport,
        &config,
        Box::new(|line| println!("{line}")),
    )?;

    teleop.run(io::stdin().lock())?;

    let published = teleop.stats().published();
    teleop.close()?;
    info!(published, "session closed");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
