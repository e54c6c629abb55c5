//! Logging setup.
//!
//! The library only emits `log` records. The binary installs a `fern`
//! dispatcher here: records go to stderr at the configured level and, when
//! logging is enabled in the config, are also appended to a file in the data
//! directory.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{Config, LoggingConfig};
use crate::constants::LOG_FILE_NAME;

/// Parse a level name from the config file.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

/// Location of the log file written when file logging is enabled.
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(Config::get_data_dir()?.join(LOG_FILE_NAME))
}

/// Build the dispatcher described by `config` without installing it.
pub fn build_dispatch(config: &LoggingConfig, verbose: bool) -> Result<fern::Dispatch> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.level).unwrap_or(LevelFilter::Warn)
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr());

    if config.enabled {
        let path = match &config.file {
            Some(path) => path.clone(),
            None => get_log_file_path()?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger. Call once, from the binary.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    build_dispatch(config, verbose)?
        .apply()
        .context("Failed to install logger")
}
