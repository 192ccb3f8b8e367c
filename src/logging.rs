//! Diagnostic log file setup.
//!
//! The hook logs through a `Dispatch` built per run instead of a global
//! subscriber, so library code and tests never share logging state.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogConfig, LogMode};
use crate::error::Error;

/// Build a dispatcher writing plain-text events to the configured log file.
pub fn dispatch(config: &LogConfig) -> Result<Dispatch, Error> {
    let file = open_log_file(&config.file, config.mode)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            Error::ConfigParse(format!("invalid log level '{}': {}", config.level, e))
        })?,
    };

    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter);

    Ok(Dispatch::new(subscriber))
}

fn open_log_file(path: &Path, mode: LogMode) -> Result<File, Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        LogMode::Append => options.append(true),
        LogMode::Overwrite => options.write(true).truncate(true),
    };
    Ok(options.open(path)?)
}
