//! Configuration loader
//!
//! Loads application configuration from an optional file, then applies
//! environment overrides.
//!
//! ## Loading Strategy
//! 1. Probe the standard locations for a config file (JSON or TOML)
//! 2. Fall back to built-in defaults when none exists
//! 3. Apply `ADOPS_*` environment overrides
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `ADOPS_API_BASE_URL`: Remote API base URL
//! - `ADOPS_API_TIMEOUT`: Request timeout in seconds
//! - `ADOPS_RETRY_MAX_ATTEMPTS`: Attempts per mutating call
//! - `ADOPS_REPORT_OUTPUT_DIR`: Directory for downloaded reports
//! - `ADOPS_REPORT_POLL_ATTEMPTS`: Status checks before giving up
//! - `ADOPS_REPORT_POLL_INTERVAL_MS`: Delay between status checks
//! - `ADOPS_LOG_LEVEL`: Default log filter
//! - `ADOPS_LOG_FILE`: Audit log file (empty disables it)
//! - `ADOPS_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./adops.toml` or `./adops.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use adops_domain::{AdOpsError, Config, Result};

const CONFIG_FILE_NAMES: &[&str] = &["adops.toml", "adops.json", "config.toml", "config.json"];

/// Load configuration: file (if any), then environment overrides.
///
/// # Errors
/// Returns `AdOpsError::Config` if a file exists but cannot be parsed, an
/// override has an invalid value, or the final configuration fails
/// validation.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(Some(path))?,
        None => match search_config_paths() {
            Some(found) => load_from_file(Some(found))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Supports both JSON and
/// TOML formats (detected by file extension). Missing sections take their
/// defaults.
///
/// # Errors
/// Returns `AdOpsError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdOpsError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => search_config_paths().ok_or_else(|| {
            AdOpsError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AdOpsError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AdOpsError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AdOpsError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AdOpsError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn search_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Apply `ADOPS_*` environment overrides on top of `config`.
///
/// # Errors
/// Returns `AdOpsError::Config` for values that do not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt("ADOPS_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(timeout) = env_parse::<u64>("ADOPS_API_TIMEOUT")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse::<u32>("ADOPS_RETRY_MAX_ATTEMPTS")? {
        config.retry.max_attempts = attempts;
    }
    if let Some(dir) = env_opt("ADOPS_REPORT_OUTPUT_DIR") {
        config.report.output_dir = dir;
    }
    if let Some(attempts) = env_parse::<u32>("ADOPS_REPORT_POLL_ATTEMPTS")? {
        config.report.poll_attempts = attempts;
    }
    if let Some(interval) = env_parse::<u64>("ADOPS_REPORT_POLL_INTERVAL_MS")? {
        config.report.poll_interval_ms = interval;
    }
    if let Some(level) = env_opt("ADOPS_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(file) = std::env::var("ADOPS_LOG_FILE") {
        config.logging.file = if file.trim().is_empty() { None } else { Some(file) };
    }
    config.logging.json = env_bool("ADOPS_LOG_JSON", config.logging.json);
    Ok(())
}

/// Non-empty environment variable, trimmed.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AdOpsError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::Builder;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const OVERRIDE_KEYS: &[&str] = &[
        "ADOPS_API_BASE_URL",
        "ADOPS_API_TIMEOUT",
        "ADOPS_RETRY_MAX_ATTEMPTS",
        "ADOPS_REPORT_OUTPUT_DIR",
        "ADOPS_REPORT_POLL_ATTEMPTS",
        "ADOPS_REPORT_POLL_INTERVAL_MS",
        "ADOPS_LOG_LEVEL",
        "ADOPS_LOG_FILE",
        "ADOPS_LOG_JSON",
    ];

    fn clear_overrides() {
        for key in OVERRIDE_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("ADOPS_TEST_BOOL_YES", "YES");
        std::env::set_var("ADOPS_TEST_BOOL_OFF", "off");
        std::env::remove_var("ADOPS_TEST_BOOL_MISSING");

        assert!(env_bool("ADOPS_TEST_BOOL_YES", false));
        assert!(!env_bool("ADOPS_TEST_BOOL_OFF", true));
        assert!(env_bool("ADOPS_TEST_BOOL_MISSING", true));

        std::env::remove_var("ADOPS_TEST_BOOL_YES");
        std::env::remove_var("ADOPS_TEST_BOOL_OFF");
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("ADOPS_API_BASE_URL", "http://localhost:9000");
        std::env::set_var("ADOPS_RETRY_MAX_ATTEMPTS", "5");
        std::env::set_var("ADOPS_REPORT_POLL_INTERVAL_MS", "250");
        std::env::set_var("ADOPS_LOG_FILE", "");
        std::env::set_var("ADOPS_LOG_JSON", "true");

        let mut config = Config::default();
        apply_env_overrides(&mut config).expect("overrides");

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.report.poll_interval_ms, 250);
        assert_eq!(config.logging.file, None);
        assert!(config.logging.json);
        assert_eq!(config.report.poll_attempts, 10);

        clear_overrides();
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("ADOPS_REPORT_POLL_ATTEMPTS", "ten");
        let err = apply_env_overrides(&mut Config::default()).unwrap_err();
        assert!(matches!(err, AdOpsError::Config(ref msg) if msg.contains("ADOPS_REPORT_POLL_ATTEMPTS")));

        clear_overrides();
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[report]\npoll_attempts = 3\n").unwrap();

        std::env::set_var("ADOPS_RETRY_MAX_ATTEMPTS", "0");
        let err = load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, AdOpsError::Config(_)));

        std::env::remove_var("ADOPS_RETRY_MAX_ATTEMPTS");
        let config = load(Some(file.path().to_path_buf())).expect("config");
        assert_eq!(config.report.poll_attempts, 3);

        clear_overrides();
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"api: {}").unwrap();

        let err = load_from_file(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, AdOpsError::Config(ref msg) if msg.contains("yaml")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_from_file(Some(PathBuf::from("/definitely/not/here/adops.toml"))).unwrap_err();
        assert!(matches!(err, AdOpsError::Config(_)));
    }
}
