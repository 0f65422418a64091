//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required base URL is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `REFUNDLINE_API_BASE_URL`: Base URL of the refund-status API (required)
//! - `REFUNDLINE_API_TIMEOUT_SECS`: Transport timeout in seconds
//! - `REFUNDLINE_USER_AGENT`: User-Agent header override
//! - `REFUNDLINE_LOG_LEVEL`: Default log filter (`RUST_LOG` still wins)
//! - `REFUNDLINE_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./refundline.json` or `./refundline.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use refundline_domain::{ApiSettings, Config, LoggingConfig, RefundlineError, Result};

use crate::errors::InfraError;

pub const ENV_API_BASE_URL: &str = "REFUNDLINE_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "REFUNDLINE_API_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "REFUNDLINE_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "REFUNDLINE_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "REFUNDLINE_LOG_JSON";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or invalid, falls back to loading from a config file.
///
/// # Errors
/// Returns `RefundlineError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `REFUNDLINE_API_BASE_URL` is required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `RefundlineError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_API_BASE_URL)?;
    parse_base_url(&base_url)?;

    let timeout_seconds = std::env::var(ENV_API_TIMEOUT_SECS)
        .ok()
        .map(|s| {
            s.parse::<u64>()
                .map_err(|e| RefundlineError::Config(format!("Invalid API timeout: {}", e)))
        })
        .transpose()?;
    let user_agent = std::env::var(ENV_USER_AGENT).ok();

    let mut logging = LoggingConfig::default();
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        logging.level = level;
    }
    logging.json = env_bool(ENV_LOG_JSON, logging.json);

    Ok(Config { api: ApiSettings { base_url, timeout_seconds, user_agent }, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `RefundlineError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RefundlineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RefundlineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RefundlineError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `RefundlineError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RefundlineError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| RefundlineError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(RefundlineError::Config(format!(
                "Unsupported config format: {}",
                extension
            )))
        }
    };

    parse_base_url(&config.api.base_url)?;

    Ok(config)
}

/// Parse an API base URL, rejecting relative or malformed values.
///
/// # Errors
/// Returns `RefundlineError::Config` if `base_url` is not an absolute URL.
pub fn parse_base_url(base_url: &str) -> Result<url::Url> {
    url::Url::parse(base_url).map_err(|e| {
        tracing::debug!(base_url, error = %e, "Rejected API base URL");
        InfraError::from(e).into()
    })
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./refundline.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("refundline.json"),
        dir.join("refundline.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `RefundlineError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        RefundlineError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
