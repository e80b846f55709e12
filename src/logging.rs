//! Tracing setup: console output plus the download event log.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};
use crate::fs::ensure_parent_dir;

/// Target for events that belong in the download event log.
pub const ARCHIVE_TARGET: &str = "archive";

/// Install the global subscriber.
///
/// Console output honours `RUST_LOG`, falling back to `default_level`.
/// Events with the [`ARCHIVE_TARGET`] target are also appended to `log_file`.
pub fn init_logging(default_level: &str, log_file: &Path) -> Result<()> {
    ensure_parent_dir(log_file)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_target(false).with_filter(filter);

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(Targets::new().with_target(ARCHIVE_TARGET, Level::INFO));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialise logging: {}", e)))
}
