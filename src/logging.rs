//! `tracing` subscribers for the chatview binary.
//!
//! [`init_cli`] logs to stderr only. [`init_production`] also keeps a JSON
//! log file that rotates daily; in that mode forwarded telemetry calls
//! (target [`TELEMETRY_TARGET`]) go to the file and stay off the console.
//!
//! The level comes from `RUST_LOG`, [`DEFAULT_DIRECTIVES`] otherwise.

use std::path::Path;

use anyhow::Context as _;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer as _};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Target of the events written by [`crate::telemetry::LogBackend`].
pub const TELEMETRY_TARGET: &str = "telemetry";

/// File name prefix of the rotated log files.
pub const LOG_FILE_PREFIX: &str = "chatview.log";

/// Flushes the log file when dropped. Keep it alive until exit.
pub struct LoggingGuard {
    _writer: WorkerGuard,
}

/// Log to stderr and to `{logs_dir}/chatview.log.YYYY-MM-DD` as JSON.
///
/// # Errors
///
/// Fails if `logs_dir` cannot be created or a subscriber is already set.
pub fn init_production(logs_dir: &Path) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("creating logs directory {}", logs_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX));

    let file = tracing_subscriber::fmt::layer().json().with_writer(writer);
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|meta| meta.target() != TELEMETRY_TARGET));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file)
        .with(console)
        .try_init()
        .context("installing log subscriber")?;

    Ok(LoggingGuard { _writer: guard })
}

/// Log to stderr only.
///
/// # Errors
///
/// Fails if a subscriber is already set; the existing one stays in place.
pub fn init_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
