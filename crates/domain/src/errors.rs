//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AdOps
///
/// Every failure path in the workspace ends up as one of these variants. None
/// of the payloads may contain the bearer token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AdOpsError {
    /// Network failure or non-2xx HTTP status. Retryable for mutating calls.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A lookup that was required to produce something produced nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied input violates a precondition; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// The remote report job reported an `error` execution status.
    #[error("Report generation failed: {0}")]
    ReportFailed(String),

    /// Polling exceeded its attempt budget.
    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdOpsError {
    /// Only transport failures are worth another attempt; everything else is
    /// either a contract violation or a caller mistake.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::MalformedResponse(_) => "malformed_response",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::ReportFailed(_) => "report_failed",
            Self::Timeout(_) => "timeout",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for AdOps operations
pub type Result<T> = std::result::Result<T, AdOpsError>;
