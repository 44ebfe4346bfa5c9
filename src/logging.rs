//! `tracing` setup for the binaries.
//!
//! The filter comes from `BLOCKFALL_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `warn`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG: &str = "BLOCKFALL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from `BLOCKFALL_LOG`, or `warn` when unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

/// Log to `path` (appending), or nowhere.
///
/// The terminal binary owns stdout and stderr while the alternate screen is
/// up, so without a file the events are filtered but never written.
pub fn init_file_or_sink(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        tracing_subscriber::registry().with(env_filter()).init();
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(path))
        .with_context(|| format!("failed to open log file {path}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter())
        .init();

    tracing::info!(path, "logging initialized");
    Ok(())
}
