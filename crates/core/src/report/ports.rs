//! Port interfaces for report generation and artifact persistence

use std::path::PathBuf;

use adops_domain::{ReportRequest, ReportStatus, Result, Session};
use async_trait::async_trait;

/// Remote report job operations
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Submit a report job and return its id.
    async fn create_report(&self, session: &Session, request: &ReportRequest) -> Result<String>;

    /// Current execution status of a job.
    async fn report_status(&self, session: &Session, report_id: &str) -> Result<ReportStatus>;

    /// Raw bytes of a finished report.
    async fn download_report(&self, session: &Session, report_id: &str) -> Result<Vec<u8>>;
}

/// Durable storage for downloaded reports
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `bytes` under `file_name` and return where they landed.
    async fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}
