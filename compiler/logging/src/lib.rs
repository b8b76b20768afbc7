#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the compiler.
//!
//! Library crates log through `tracing` macros and never install a subscriber.
//! Binaries call [`init`] once with the configured level; `RUST_LOG` overrides it.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level string is not a valid filter directive.
    #[error("Invalid log level '{0}': {1}")]
    InvalidLevel(String, String),
    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global subscriber.
///
/// Logs go to stderr, and additionally to `file` when given. Returns `false`
/// without doing anything if a subscriber was already installed by this process.
pub fn init(level: &str, file: Option<&Path>) -> Result<bool, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| LoggingError::InvalidLevel(level.to_string(), e.to_string()))?,
    };
    if INSTALLED.get().is_some() {
        return Ok(false);
    }

    let file_layer = match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let handle = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Mutex::new(handle)).with_ansi(false).with_target(true))
        }
        None => None,
    };
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();
    let _ = INSTALLED.set(());
    Ok(installed)
}

/// Emits a trace event with a module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(target: "protogen", module, "{}", msg);
}
