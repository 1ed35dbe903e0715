//! Unit tests for the logging subsystem.

use std::{fs, path::PathBuf};

use tracing::{info, Level};

use super::*;

fn init_config(log_dir: Option<&PathBuf>) -> LoggingInitConfig<'_> {
    LoggingInitConfig {
        service_base_name: "byield-cli",
        service_label: Some("testnet"),
        service_version: Some("0.1.0"),
        log_dir,
        log_file_prefix: None,
        json_format: None,
        default_log_prefix: "byield",
    }
}

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("byield", None), "byield");
    assert_eq!(format_service_name("byield", Some("dev")), "byield%dev");
}

#[test]
fn test_logger_config_builder_pattern() {
    let config = LoggerConfig::new("test-service".to_string())
        .with_service_version("2.0.0".to_string())
        .with_default_level(Level::DEBUG)
        .with_json_logging(true)
        .with_ansi(false)
        .with_stderr(true);

    assert_eq!(config.service_name, "test-service");
    assert_eq!(config.service_version, Some("2.0.0".to_string()));
    assert_eq!(config.default_level, Level::DEBUG);
    assert!(config.stdout_config.json_format);
    assert!(!config.stdout_config.ansi);
    assert!(config.stdout_config.use_stderr);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_console_logs_default_to_stdout() {
    assert!(!LoggerConfig::default().stdout_config.use_stderr);
    assert!(!logger_config(&init_config(None)).stdout_config.use_stderr);
}

#[test]
fn test_logger_config_from_init_config() {
    let config = logger_config(&init_config(None));
    assert_eq!(config.service_name, "byield-cli%testnet");
    assert_eq!(config.service_version.as_deref(), Some("0.1.0"));
    assert!(config.file_logging_config.is_none());
    assert!(!config.stdout_config.json_format);

    let dir = PathBuf::from("/var/log/byield");
    let mut init = init_config(Some(&dir));
    init.json_format = Some(true);
    let config = logger_config(&init);
    let file = config.file_logging_config.expect("file logging enabled");
    assert_eq!(file.directory, dir);
    assert_eq!(file.file_name_prefix, "byield");
    assert!(file.json_format);
    assert!(config.stdout_config.json_format);
}

// The only test installing the global subscriber.
#[test]
fn test_init_writes_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_path_buf();
    let config = logger_config(&init_config(Some(&path)))
        .with_ansi(false)
        .with_stderr(true)
        .with_default_level(Level::INFO);
    init(config).unwrap();

    info!(marker = "file-layer-check", "hello from the test");

    // installing a second subscriber fails instead of panicking
    assert!(matches!(
        init(LoggerConfig::default()),
        Err(LoggingError::Subscriber(_))
    ));

    let contents: String = fs::read_dir(&path)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(contents.contains("file-layer-check"), "{contents}");
}
