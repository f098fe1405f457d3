//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use adops_domain::ReportFormat;
use adops_infra::config;
use tempfile::Builder;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "api": {
            "base_url": "https://api.example.test",
            "timeout_seconds": 12
        },
        "report": {
            "poll_attempts": 4,
            "output_dir": "/tmp/reports",
            "format": "csv"
        }
    }"#;

    let mut temp_file =
        Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config from JSON file");

    assert_eq!(config.api.base_url, "https://api.example.test");
    assert_eq!(config.api.timeout_seconds, 12);
    assert_eq!(config.report.poll_attempts, 4);
    assert_eq!(config.report.output_dir, "/tmp/reports");
    assert_eq!(config.report.format, ReportFormat::Csv);

    // Untouched sections keep their defaults
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.logging.file.as_deref(), Some("app.log"));
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[retry]
max_attempts = 4
base_delay_ms = 500
max_delay_ms = 4000

[logging]
level = "debug"
json = true
"#;

    let mut temp_file =
        Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.retry.max_attempts, 4);
    assert_eq!(config.retry.base_delay_ms, 500);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert_eq!(config.api.base_url, "https://api.appnexus.com");
}

#[test]
fn test_invalid_toml_is_rejected() {
    let mut temp_file =
        Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    temp_file.write_all(b"[retry\nmax_attempts = ").expect("Failed to write to temp file");

    let result = config::load_from_file(Some(temp_file.path().to_path_buf()));
    assert!(result.is_err(), "Malformed TOML should fail to load");
}
