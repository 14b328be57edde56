//! Application configuration from CLI flags and environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use picalc_core::calculator::PiError;
use picalc_core::options::{DigitMode, Options};

/// PiCalc-rs: compute pi to any number of digits with the Chudnovsky series.
#[derive(Parser, Debug)]
#[command(name = "picalc", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of decimal digits to compute.
    #[arg(
        short = 'n',
        long,
        default_value_t = 100,
        env = "PICALC_DIGITS",
        allow_negative_numbers = true
    )]
    pub digits: i64,

    /// Round the last digit instead of truncating.
    #[arg(long)]
    pub round: bool,

    /// Quiet mode (only output the digits).
    #[arg(short, long)]
    pub quiet: bool,

    /// Never abbreviate long results.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show summed and estimated term counts and the working precision.
    #[arg(short, long)]
    pub details: bool,

    /// Write the result to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Timeout duration (e.g., "5m", "30s", "500ms").
    #[arg(long, default_value = "5m", env = "PICALC_TIMEOUT")]
    pub timeout: String,

    /// Serve the HTTP API on this address instead of computing once.
    #[arg(long, value_name = "ADDR", env = "PICALC_SERVE")]
    pub serve: Option<SocketAddr>,

    /// Worker threads for served tasks (0 = one per CPU).
    #[arg(long, default_value_t = 0, env = "PICALC_WORKERS")]
    pub workers: usize,

    /// Served tasks kept in memory; the oldest finished ones are evicted first.
    #[arg(
        long,
        default_value_t = picalc_orchestration::DEFAULT_TASK_CAPACITY,
        env = "PICALC_TASK_CAPACITY"
    )]
    pub task_capacity: usize,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the timeout flag.
    pub fn timeout_duration(&self) -> Result<Duration, PiError> {
        parse_duration(&self.timeout).ok_or_else(|| {
            PiError::InvalidArgument(format!("invalid timeout duration: {:?}", self.timeout))
        })
    }

    /// Engine options selected by the flags.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            digit_mode: if self.round {
                DigitMode::Round
            } else {
                DigitMode::Truncate
            },
        }
    }
}

/// Parse a duration string like "5m", "1h", "30s", "500ms"; bare numbers are seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        n.checked_mul(60).map(Duration::from_secs)
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        n.checked_mul(3600).map(Duration::from_secs)
    } else {
        s.parse().ok().map(Duration::from_secs)
    }
}
