//! Logging Tests

use kvlock_domain::Error;
use kvlock_infrastructure::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};
use kvlock_infrastructure::logging::{
    LoggingConfig, build_file_appender, init_logging, parse_log_level,
};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use tracing::Level;

fn log_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("kvlock"))
        .collect()
}

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
    assert_eq!(config.max_files, LOG_MAX_FILES);
}

#[test]
fn test_file_appender_writes_dated_file() {
    let dir = TempDir::new().unwrap();
    let mut appender = build_file_appender(&dir.path().join("kvlock.log"), 3).unwrap();

    appender.write_all(b"lock acquired\n").unwrap();
    appender.flush().unwrap();

    let files = log_files(dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(".log"), "unexpected file name: {}", files[0]);

    let contents = std::fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert_eq!(contents, "lock acquired\n");
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(matches!(
        init_logging(config),
        Err(Error::Configuration { .. })
    ));
}

// The only test in this binary that installs the global subscriber
#[test]
fn test_init_logging_json_file_once() {
    let dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        level: "info".to_string(),
        json_format: true,
        file_output: Some(dir.path().join("kvlock.log")),
        max_files: 2,
    };

    init_logging(config.clone()).unwrap();
    tracing::info!(key = "dev:kvlock:string:job", "file sink check");

    let files = log_files(dir.path());
    assert_eq!(files.len(), 1);
    let contents = std::fs::read_to_string(dir.path().join(&files[0])).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("file sink check"))
        .expect("event written to the log file");
    assert!(line.contains(r#""level":"INFO""#), "not a JSON event: {line}");

    assert!(matches!(
        init_logging(config),
        Err(Error::Configuration { .. })
    ));
}
