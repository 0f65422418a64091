//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! feeding it into the API client.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use refundline_domain::RefundlineError;
use refundline_infra::config;
use refundline_infra::{ApiClient, ApiClientConfig, Session};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
        "api": {
            "base_url": "https://refunds.example.com",
            "timeout_seconds": 45,
            "user_agent": "refundline-integration"
        },
        "logging": {
            "level": "debug",
            "json": true
        }
    }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file");

    let config = result.unwrap();
    assert_eq!(config.api.base_url, "https://refunds.example.com");
    assert_eq!(config.api.timeout_seconds, Some(45));
    assert_eq!(config.api.user_agent.as_deref(), Some("refundline-integration"));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
[api]
base_url = "http://localhost:8080"

[logging]
level = "warn"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");

    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(config.api.timeout_seconds, None);
    assert_eq!(config.logging.level, "warn");
    assert!(!config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_builds_client() {
    let path = write_config(
        r#"{ "api": { "base_url": "https://refunds.example.com/", "timeout_seconds": 5 } }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    let client_config = ApiClientConfig::from(&config.api);
    assert_eq!(client_config.timeout, Some(Duration::from_secs(5)));

    let client = ApiClient::new(client_config, Arc::new(Session::new()));
    assert!(client.is_ok(), "client should build from loaded config");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(RefundlineError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "this is": "not valid" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(RefundlineError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}
