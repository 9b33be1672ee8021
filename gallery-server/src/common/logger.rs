//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production
//! environments: console output filtered by `RUST_LOG`, plus an optional
//! daily-rotating application log file.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console-only logging (development / tests)
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Initialize logging with a daily-rotating file in `log_dir/app`
///
/// Returns the appender guard; dropping it stops the background writer, so
/// the caller must keep it alive for the process lifetime.
pub fn init_logger_with_file(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let app_log_dir = log_dir.join("app");
    std::fs::create_dir_all(&app_log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}
