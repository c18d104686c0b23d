//! Per-run context and outcome types.

use chrono::{DateTime, Utc};
use tracing::{Span, info_span};

use super::{JobStatus, ReportRow, TabGroupSnapshot};
use crate::error::CollectError;

/// Context of one collection run against a tab group.
///
/// Passed explicitly to every step so log entries carry the group and
/// collection time without process-wide logger state.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub group: String,
    pub collected_at: DateTime<Utc>,
    pub summary_url: String,
}

impl RunContext {
    pub fn new(group: &str, collected_at: DateTime<Utc>, summary_url: String) -> Self {
        RunContext {
            group: group.to_string(),
            collected_at,
            summary_url,
        }
    }

    /// Tracing span carrying the run fields.
    pub fn span(&self) -> Span {
        info_span!(
            "collect",
            group = %self.group,
            collected_at = %self.collected_at.to_rfc3339(),
            summary_url = %self.summary_url,
        )
    }
}

/// A job whose test table could not be collected.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFailure {
    pub job: String,
    pub status: JobStatus,
    pub error: CollectError,
}

impl JobFailure {
    /// URL that was attempted.
    pub fn url(&self) -> &str {
        self.error.url()
    }
}

/// Everything produced by a successful run against one tab group.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub snapshot: TabGroupSnapshot,
    pub rows: Vec<ReportRow>,
    pub failures: Vec<JobFailure>,
}

/// Aggregate outcome over all configured tab groups.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<GroupReport>,
    /// Groups whose summary could not be collected
    pub failed_groups: Vec<(String, CollectError)>,
}

impl RunSummary {
    /// All report rows, in group order.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.reports.iter().flat_map(|report| report.rows.iter())
    }

    /// Per-job failures over all groups.
    pub fn job_failures(&self) -> impl Iterator<Item = &JobFailure> {
        self.reports.iter().flat_map(|report| report.failures.iter())
    }

    /// Process exit code: non-zero when any group's summary failed.
    pub fn exit_code(&self) -> i32 {
        if self.failed_groups.is_empty() { 0 } else { 1 }
    }
}
