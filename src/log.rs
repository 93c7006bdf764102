//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI while clid runs, so logs normally go to a
//! file. The filter is taken from `CLID_LOG`, then `RUST_LOG`, then the
//! level passed in.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CLID_LOG";

pub const LOG_FILE_NAME: &str = "clid.log";

pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "clid").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

pub fn build_env_filter(default_level: Level) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(default_level.as_str())
}

/// Install the global subscriber, writing to `log_file` or to stderr when
/// `None`. The returned guard flushes the file writer on drop and must be
/// kept alive for the life of the process.
pub fn init_tracing(default_level: Level, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = build_env_filter(default_level);

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init()
            .map_err(|e| Error::Logging(e.to_string()))?;
        return Ok(None);
    };

    let directory = log_file.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory).map_err(|e| Error::io(directory, e))?;
    let file_name = log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(Some(guard))
}
