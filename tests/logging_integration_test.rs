//! Integration test for file logging
//!
//! A global subscriber can only be installed once per process, so this
//! binary holds a single test.

use catalog_feed::config::LoggingConfig;
use catalog_feed::logging::init_logging;
use catalog_feed::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_file_logging_writes_json_lines() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_dir.to_string_lossy().to_string(),
        local_rotation: "daily".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(guard.has_file_output());

    tracing::warn!(target: "catalog_feed::logging", product_id = 7, image_id = 70, "Image not found on filesystem");

    // A second subscriber cannot be installed
    let second = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    assert!(init_logging("info", &second).is_err());

    drop(guard);

    let log_file = std::fs::read_dir(&log_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_NAME))
        .expect("log file should be created");

    let contents = std::fs::read_to_string(log_file.path()).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Image not found"))
        .expect("warning should be logged");
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["level"], "WARN");
    assert_eq!(json["fields"]["product_id"], 7);
}
