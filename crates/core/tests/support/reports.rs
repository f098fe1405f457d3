//! Mock implementations of the report and artifact ports

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use adops_core::{ArtifactStore, ReportApi};
use adops_domain::{ReportRequest, ReportStatus, Result, Session};
use async_trait::async_trait;

/// Report API that replays a scripted sequence of statuses.
///
/// Once the script is exhausted every further status call reports a pending
/// job.
pub struct MockReportApi {
    create_result: Result<String>,
    statuses: Mutex<VecDeque<Result<ReportStatus>>>,
    download_result: Result<Vec<u8>>,
    requests: Mutex<Vec<ReportRequest>>,
    status_calls: Mutex<u32>,
    download_calls: Mutex<u32>,
}

impl MockReportApi {
    pub fn new(report_id: &str) -> Self {
        Self {
            create_result: Ok(report_id.to_string()),
            statuses: Mutex::new(VecDeque::new()),
            download_result: Ok(b"report-bytes".to_vec()),
            requests: Mutex::new(Vec::new()),
            status_calls: Mutex::new(0),
            download_calls: Mutex::new(0),
        }
    }

    pub fn with_create_result(mut self, result: Result<String>) -> Self {
        self.create_result = result;
        self
    }

    pub fn with_statuses(self, statuses: Vec<Result<ReportStatus>>) -> Self {
        *self.statuses.lock().expect("lock") = statuses.into();
        self
    }

    pub fn with_download_result(mut self, result: Result<Vec<u8>>) -> Self {
        self.download_result = result;
        self
    }

    pub fn status_calls(&self) -> u32 {
        *self.status_calls.lock().expect("lock")
    }

    pub fn download_calls(&self) -> u32 {
        *self.download_calls.lock().expect("lock")
    }

    pub fn requests(&self) -> Vec<ReportRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ReportApi for MockReportApi {
    async fn create_report(&self, _session: &Session, request: &ReportRequest) -> Result<String> {
        self.requests.lock().expect("lock").push(request.clone());
        self.create_result.clone()
    }

    async fn report_status(&self, _session: &Session, _report_id: &str) -> Result<ReportStatus> {
        *self.status_calls.lock().expect("lock") += 1;
        self.statuses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Ok(ReportStatus::Pending(Some("running".to_string()))))
    }

    async fn download_report(&self, _session: &Session, _report_id: &str) -> Result<Vec<u8>> {
        *self.download_calls.lock().expect("lock") += 1;
        self.download_result.clone()
    }
}

/// Artifact store that keeps files in memory.
#[derive(Default)]
pub struct MemoryArtifactStore {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryArtifactStore {
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.files.lock().expect("lock").push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("/memory").join(file_name))
    }
}
