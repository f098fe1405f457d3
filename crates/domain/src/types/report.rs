//! Report job types
//!
//! A report request is built once by the caller, serialised into the remote
//! payload, then tracked through [`ReportState`] until an artifact exists.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AdvertiserId;
use crate::constants::{
    DEFAULT_REPORT_COLUMNS, DEFAULT_REPORT_TYPE, REPORT_DATE_FORMAT, REPORT_TIMESTAMP_FORMAT,
};
use crate::errors::{AdOpsError, Result};
use crate::impl_wire_enum_conversions;

/// Output format requested from the remote report service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Excel,
    Csv,
}

impl_wire_enum_conversions!(ReportFormat {
    Excel => "excel",
    Csv => "csv",
});

impl ReportFormat {
    /// File extension used for the persisted artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Time window of a report; explicit dates and a named interval are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWindow {
    Custom { start: NaiveDate, end: NaiveDate },
    Interval(String),
}

impl ReportWindow {
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AdOpsError::Validation(format!(
                "report start date {start} is after end date {end}"
            )));
        }
        Ok(Self::Custom { start, end })
    }

    pub fn interval(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AdOpsError::Validation("report interval must not be empty".to_string()));
        }
        Ok(Self::Interval(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub advertiser_id: AdvertiserId,
    pub report_type: String,
    pub columns: Vec<String>,
    pub format: ReportFormat,
    pub window: ReportWindow,
}

impl ReportRequest {
    /// Site/domain performance report in the default format.
    pub fn site_domain_performance(advertiser_id: AdvertiserId, window: ReportWindow) -> Self {
        Self {
            advertiser_id,
            report_type: DEFAULT_REPORT_TYPE.to_string(),
            columns: DEFAULT_REPORT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            format: ReportFormat::Excel,
            window,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Body for the report creation call.
    pub fn to_payload(&self) -> Value {
        let mut report = json!({
            "report_type": self.report_type,
            "columns": self.columns,
            "format": self.format.as_str(),
        });

        match &self.window {
            ReportWindow::Custom { start, end } => {
                report["start_date"] = json!(start.format(REPORT_DATE_FORMAT).to_string());
                report["end_date"] = json!(end.format(REPORT_DATE_FORMAT).to_string());
            }
            ReportWindow::Interval(name) => {
                report["report_interval"] = json!(name);
            }
        }

        json!({ "report": report })
    }
}

/// Execution status reported by the remote job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Pending(Option<String>),
    Ready,
    Error,
}

impl ReportStatus {
    /// Anything other than `ready` or `error` (including a missing value) is
    /// still pending.
    pub fn from_execution_status(status: Option<&str>) -> Self {
        match status {
            Some("ready") => Self::Ready,
            Some("error") => Self::Error,
            other => Self::Pending(other.map(str::to_string)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending(_))
    }
}

/// Orchestrator state; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    Requested,
    Polling,
    Ready,
    Errored,
    TimedOut,
}

impl ReportState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Errored | Self::TimedOut)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: ReportState) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::Polling)
                | (Self::Polling, Self::Polling)
                | (Self::Polling, Self::Ready)
                | (Self::Polling, Self::Errored)
                | (Self::Polling, Self::TimedOut)
        )
    }
}

/// Downloaded report, persisted under `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub report_id: String,
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn artifact_file_name<Tz>(prefix: &str, at: &DateTime<Tz>, extension: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.{extension}", at.format(REPORT_TIMESTAMP_FORMAT))
}

/// Artifact file name stamped with the local wall clock.
pub fn artifact_file_name_now(prefix: &str, format: ReportFormat) -> String {
    artifact_file_name(prefix, &Local::now(), format.extension())
}
