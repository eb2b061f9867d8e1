// SPDX-License-Identifier: MPL-2.0
//! Tracing setup for the binary.
//!
//! The library only emits `tracing` events. The binary installs a
//! subscriber once at startup; `RUST_LOG` overrides the level derived from
//! the `-v` count.

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Maps a `-v` count to a level name (0=warn, 1=info, 2=debug, 3+=trace).
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for_verbosity(verbosity);
        EnvFilter::new(format!("warn,notice_stack={}", level))
    })
}

/// Initializes the global subscriber.
///
/// Logs go to stderr, or are appended to `log_file` without ANSI colors.
/// Fails when a subscriber is already installed.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = filter_for(verbosity);
    let detailed = verbosity >= 2;

    match log_file {
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(detailed)
                    .with_line_number(detailed),
            )
            .try_init()
            .map_err(|e| Error::Io(e.to_string())),
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(detailed)
                        .with_line_number(detailed),
                )
                .try_init()
                .map_err(|e| Error::Io(e.to_string()))
        }
    }
}
