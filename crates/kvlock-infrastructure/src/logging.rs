//! Structured logging with tracing
//!
//! Installs the process-wide subscriber: an `EnvFilter`, plain or JSON
//! formatting on stderr, and an optional daily-rolling log file.

use crate::constants::LOG_FILTER_ENV;
use crate::error_ext::ErrorContext;
use kvlock_domain::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration
///
/// `KVLOCK_LOG`, when set to a valid filter directive, overrides
/// `config.level`. Fails if a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config
        .file_output
        .as_deref()
        .map(|path| build_file_appender(path, config.max_files))
        .transpose()?;

    // Formatter types differ, so each format gets its own branch
    if config.json_format {
        let stderr = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry
                .with(stderr)
                .with(file)
                .try_init()
                .config_context("Failed to install tracing subscriber")?;
        } else {
            registry
                .with(stderr)
                .try_init()
                .config_context("Failed to install tracing subscriber")?;
        }
    } else {
        let stderr = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry
                .with(stderr)
                .with(file)
                .try_init()
                .config_context("Failed to install tracing subscriber")?;
        } else {
            registry
                .with(stderr)
                .try_init()
                .config_context("Failed to install tracing subscriber")?;
        }
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Daily-rolling appender writing next to `path`, named after its stem and extension
///
/// `max_files == 0` keeps every rotated file.
pub fn build_file_appender(path: &Path, max_files: usize) -> Result<RollingFileAppender> {
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let prefix = path.file_stem().unwrap_or_else(|| OsStr::new("kvlock"));

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix.to_string_lossy().into_owned());
    if let Some(suffix) = path.extension() {
        builder = builder.filename_suffix(suffix.to_string_lossy().into_owned());
    }
    if max_files > 0 {
        builder = builder.max_log_files(max_files);
    }

    builder
        .build(directory)
        .config_context(format!("Failed to open log file in {}", directory.display()))
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
