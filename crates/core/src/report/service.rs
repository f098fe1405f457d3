//! Report orchestrator
//!
//! `Requested -> Polling -> {Ready, Errored, TimedOut}`. Creation failure ends
//! the run before polling starts. Each poll consumes one attempt; the fixed
//! interval is only slept between attempts. A transport error while polling
//! is terminal. Only `Ready` leads to a download, and the download is not
//! retried.

use std::sync::Arc;
use std::time::Duration;

use adops_domain::constants::{
    DEFAULT_REPORT_FILE_PREFIX, DEFAULT_REPORT_POLL_ATTEMPTS, DEFAULT_REPORT_POLL_INTERVAL_MS,
};
use adops_domain::{
    artifact_file_name_now, AdOpsError, ReportArtifact, ReportRequest, ReportSettings,
    ReportState, ReportStatus, Result, Session,
};
use tracing::{debug, error, info, instrument, warn};

use super::ports::{ArtifactStore, ReportApi};

/// Attempt budget and spacing for status polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_REPORT_POLL_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_REPORT_POLL_INTERVAL_MS),
        }
    }
}

impl From<&ReportSettings> for PollPolicy {
    fn from(settings: &ReportSettings) -> Self {
        Self {
            max_attempts: settings.poll_attempts.max(1),
            interval: Duration::from_millis(settings.poll_interval_ms),
        }
    }
}

/// How polling ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEnd {
    Ready,
    Errored,
    TimedOut,
}

impl From<PollEnd> for ReportState {
    fn from(end: PollEnd) -> Self {
        match end {
            PollEnd::Ready => ReportState::Ready,
            PollEnd::Errored => ReportState::Errored,
            PollEnd::TimedOut => ReportState::TimedOut,
        }
    }
}

/// Terminal polling state and how many status calls it took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub end: PollEnd,
    pub attempts: u32,
}

pub struct ReportOrchestrator {
    api: Arc<dyn ReportApi>,
    store: Arc<dyn ArtifactStore>,
    policy: PollPolicy,
    file_prefix: String,
}

impl ReportOrchestrator {
    pub fn new(api: Arc<dyn ReportApi>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            api,
            store,
            policy: PollPolicy::default(),
            file_prefix: DEFAULT_REPORT_FILE_PREFIX.to_string(),
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Generate, poll and download a report.
    #[instrument(skip(self, session, request), fields(advertiser_id = request.advertiser_id))]
    pub async fn run(&self, session: &Session, request: &ReportRequest) -> Result<ReportArtifact> {
        let report_id = self.api.create_report(session, request).await.map_err(|err| {
            error!(error = %err, "Report creation failed");
            err
        })?;
        if report_id.trim().is_empty() {
            return Err(AdOpsError::MalformedResponse(
                "report creation returned an empty report_id".to_string(),
            ));
        }
        info!(report_id = %report_id, "Report requested");

        let outcome = self.poll(session, &report_id).await?;
        match outcome.end {
            PollEnd::Ready => {}
            PollEnd::Errored => {
                return Err(AdOpsError::ReportFailed(format!(
                    "report {report_id} finished with execution_status=error"
                )));
            }
            PollEnd::TimedOut => {
                return Err(AdOpsError::Timeout(format!(
                    "report {report_id} not ready after {} status checks",
                    outcome.attempts
                )));
            }
        }

        let bytes = self.api.download_report(session, &report_id).await.map_err(|err| {
            error!(report_id = %report_id, error = %err, "Report download failed");
            err
        })?;

        let file_name = artifact_file_name_now(&self.file_prefix, request.format);
        let path = self.store.persist(&file_name, &bytes).await?;
        info!(report_id = %report_id, path = %path.display(), bytes = bytes.len(), "Report downloaded");

        Ok(ReportArtifact { report_id, file_name, path, bytes })
    }

    /// Poll `report_id` until a terminal status or the attempt budget runs out.
    ///
    /// A status call that fails is returned as the error; polling does not
    /// continue past it.
    #[instrument(skip(self, session), fields(max_attempts = self.policy.max_attempts))]
    pub async fn poll(&self, session: &Session, report_id: &str) -> Result<PollOutcome> {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let status = self.api.report_status(session, report_id).await.map_err(|err| {
                error!(attempt, error = %err, "Report status check failed");
                err
            })?;

            let end = match status {
                ReportStatus::Ready => Some(PollEnd::Ready),
                ReportStatus::Error => {
                    warn!(attempt, "Report generation reported an error");
                    Some(PollEnd::Errored)
                }
                ReportStatus::Pending(raw) => {
                    debug!(attempt, status = raw.as_deref().unwrap_or("<none>"), "Report pending");
                    None
                }
            };
            if let Some(end) = end {
                debug_assert!(ReportState::Polling.can_transition_to(end.into()));
                return Ok(PollOutcome { end, attempts: attempt });
            }

            if attempt < max_attempts && !self.policy.interval.is_zero() {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        warn!(attempts = max_attempts, "Report polling timed out");
        Ok(PollOutcome { end: PollEnd::TimedOut, attempts: max_attempts })
    }
}
