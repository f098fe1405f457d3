//! Application constants
//!
//! Centralized location for the defaults and remote API paths used
//! throughout the application.

// Remote API
pub const DEFAULT_API_BASE_URL: &str = "https://api.appnexus.com";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("adops/", env!("CARGO_PKG_VERSION"));

pub const PATH_AUTH: &str = "/auth";
pub const PATH_CITY: &str = "/city";
pub const PATH_INSERTION_ORDER: &str = "/insertion-order";
pub const PATH_LINE_ITEM: &str = "/line-item";
pub const PATH_PROFILE: &str = "/profile";
pub const PATH_REPORT: &str = "/report";
pub const PATH_REPORT_DOWNLOAD: &str = "/report-download";

// Retrying mutator
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 2_000;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 10_000;

// Report polling
pub const DEFAULT_REPORT_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_REPORT_POLL_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_REPORT_FILE_PREFIX: &str = "site_domain_performance";
pub const DEFAULT_REPORT_TYPE: &str = "site_domain_performance";
pub const DEFAULT_REPORT_COLUMNS: &[&str] =
    &["day", "site_domain", "imps", "clicks", "total_convs", "booked_revenue"];
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// Targeting
pub const CITY_ACTION_INCLUDE: &str = "include";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "app.log";
