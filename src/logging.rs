//! Logging setup for the `confsync` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. Logs go to stderr so command output on stdout stays
//! machine-readable.

use crate::error::{ConfsyncError, Result};
use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive, e.g. `confsync=debug`.
pub const LOG_ENV: &str = "CONFSYNC_LOG";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber.
///
/// `CONFSYNC_LOG` takes precedence over `verbosity` (the `-v` count). Calling
/// this more than once is harmless: later calls leave the first subscriber
/// in place.
pub fn init_logging(verbosity: u8, format: LogFormat) -> Result<()> {
    let filter = build_env_filter(verbosity)?;
    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    };
    Ok(())
}

/// Filter from `CONFSYNC_LOG` if set, otherwise from the verbosity level.
fn build_env_filter(verbosity: u8) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| {
                ConfsyncError::UserError(format!("invalid {} directive '{}': {}", LOG_ENV, directives, e))
            }),
        _ => Ok(EnvFilter::new(level_for(verbosity))),
    }
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
