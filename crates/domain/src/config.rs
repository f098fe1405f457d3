//! Configuration structures
//!
//! Every section has defaults, so a partial file (or no file at all) yields a
//! usable configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    DEFAULT_REPORT_FILE_PREFIX, DEFAULT_REPORT_POLL_ATTEMPTS, DEFAULT_REPORT_POLL_INTERVAL_MS,
    DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_DELAY_MS,
    DEFAULT_USER_AGENT,
};
use crate::errors::{AdOpsError, Result};
use crate::types::ReportFormat;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub retry: RetrySettings,
    pub report: ReportSettings,
    pub logging: LoggingConfig,
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AdOpsError::Config("api.base_url must not be empty".to_string()));
        }
        if self.retry.max_attempts == 0 {
            return Err(AdOpsError::Config("retry.max_attempts must be at least 1".to_string()));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(AdOpsError::Config(format!(
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }
        if self.report.poll_attempts == 0 {
            return Err(AdOpsError::Config("report.poll_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Retry budget for mutating calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        }
    }
}

/// Report polling and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
    pub output_dir: String,
    pub file_prefix: String,
    pub format: ReportFormat,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            poll_attempts: DEFAULT_REPORT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_REPORT_POLL_INTERVAL_MS,
            output_dir: ".".to_string(),
            file_prefix: DEFAULT_REPORT_FILE_PREFIX.to_string(),
            format: ReportFormat::Excel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), file: Some(DEFAULT_LOG_FILE.to_string()), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_operational_values() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.appnexus.com");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.report.poll_attempts, 10);
        assert_eq!(config.report.poll_interval_ms, 5_000);
        assert_eq!(config.logging.file.as_deref(), Some("app.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let config: Config = toml::from_str("[retry]\nmax_attempts = 5\n").expect("parse toml");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 2_000);
        assert_eq!(config.report.format, ReportFormat::Excel);
    }

    #[test]
    fn zero_attempt_budgets_are_rejected() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(matches!(config.validate(), Err(AdOpsError::Config(_))));

        let mut config = Config::default();
        config.report.poll_attempts = 0;
        assert!(matches!(config.validate(), Err(AdOpsError::Config(_))));
    }

    #[test]
    fn blank_base_url_is_rejected() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
