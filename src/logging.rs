//! File-backed tracing setup.
//!
//! The dialog owns the terminal while it runs, so nothing is ever written to
//! stdout or stderr. Events go to a log file only when one is requested.

use crate::error::Error;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "MULTISTEP_LOG";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. The returned guard must stay alive for
/// buffered events to reach the file.
pub fn init(log_file: &Path) -> Result<WorkerGuard, Error> {
    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| Error::Logging(format!("{} is not a file path", log_file.display())))?;

    std::fs::create_dir_all(directory)?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;

    tracing::info!(path = %log_file.display(), "logging initialized");
    Ok(guard)
}
