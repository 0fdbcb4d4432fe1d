//! Logging configuration using the tracing ecosystem.
//!
//! Output goes to a daily-rotated file, never to the terminal, because the
//! TUI owns the screen. The level comes from `RUST_LOG` and falls back to
//! [`DEFAULT_LOG_FILTER`].
//!
//! Log files live in the platform-specific local data directory:
//! - Linux: `~/.local/share/gqltable/logs/`
//! - macOS: `~/Library/Application Support/gqltable/logs/`
//! - Windows: `C:\Users\<User>\AppData\Local\gqltable\logs\`
//!
//! Useful filters:
//! - `RUST_LOG=gqltable=debug` shows table state transitions
//! - `RUST_LOG=gqltable::api=trace` adds cache hits and request bodies

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "gqltable=info,warn";

const LOG_FILE_PREFIX: &str = "gqltable.log";

/// Initialize logging into the default log directory.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    init_in(&log_dir)
}

/// Initialize logging into `log_dir`.
pub fn init_in(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gqltable starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("gqltable").join("logs"))
}

/// Where logs are written, for display in the help overlay.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("gqltable shutting down");
}
