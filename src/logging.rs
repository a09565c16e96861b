//! Logging setup for filevault.
//!
//! Console output is always on. When `[logging] file` is set the same events
//! are also appended to that file without ANSI colors. `RUST_LOG`, when set,
//! replaces the configured level entirely.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, VaultError};

/// Targets that are too chatty at the configured level.
const QUIET_TARGETS: &str = "sqlx::query=warn";

/// Normalize a configured level name; unknown names fall back to `info`.
fn level_name(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{QUIET_TARGETS}", level_name(level))))
}

/// Open the log file for appending, creating its directory if needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber described by `config`.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file_layer = match config.file.as_str() {
        "" => None,
        path => Some(
            fmt::layer()
                .with_writer(Arc::new(open_log_file(Path::new(path))?))
                .with_ansi(false),
        ),
    };

    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| VaultError::Config(format!("logging: {e}")))
}

/// Console-only fallback used when [`init`] fails.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_target(true))
        .try_init();
}
