//! Flat report row model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timestamp layout of the report, matching `date(1)` output in UTC.
pub const UNIX_DATE_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

/// One line of the report: a single test outcome, or a passing job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub collected_at: DateTime<Utc>,
    pub status: String,
    pub job: String,
    pub sig: String,
    pub test: String,
    pub url: String,
}

impl ReportRow {
    /// Render as `collected_at,status,job,"sig","test",url`.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.collected_at.format(UNIX_DATE_FORMAT),
            self.status,
            self.job,
            quote(&self.sig),
            quote(&self.test),
            self.url
        )
    }
}

/// Wrap in double quotes, doubling any embedded quote.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
