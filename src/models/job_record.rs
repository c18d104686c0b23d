//! Job status model as reported by the TestGrid summary endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use super::TestResult;

/// Overall status of a CI job.
///
/// Matching is ASCII case-insensitive for every variant. `FAILED` is accepted
/// as an alias of `FAILING`. Anything else is kept verbatim as `Other`; a
/// missing or `null` status is `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Flaky,
    Failing,
    Passing,
    Other(String),
}

impl JobStatus {
    /// Canonical string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Flaky => "FLAKY",
            Self::Failing => "FAILING",
            Self::Passing => "PASSING",
            Self::Other(s) => s,
        }
    }

    /// Parse from the raw `overall_status` value.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("FLAKY") {
            Self::Flaky
        } else if s.eq_ignore_ascii_case("FAILING") || s.eq_ignore_ascii_case("FAILED") {
            Self::Failing
        } else if s.eq_ignore_ascii_case("PASSING") {
            Self::Passing
        } else {
            Self::Other(s.to_string())
        }
    }

    /// Whether jobs with this status get their test table fetched.
    pub fn needs_test_details(&self) -> bool {
        matches!(self, Self::Flaky | Self::Failing)
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Other(String::new())
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        JobStatus::parse(&s)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Last-known status of one CI job. The job name is the key of the
/// containing map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_status: JobStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert: String,
    #[serde(rename = "last_run_timestamp", default, deserialize_with = "null_as_default")]
    pub last_run: i64,
    #[serde(rename = "last_update_timestamp", default, deserialize_with = "null_as_default")]
    pub last_update: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_green: String,
    #[serde(rename = "overall_status_icon", default, deserialize_with = "null_as_default")]
    pub status_icon: String,
    #[serde(rename = "status", default, deserialize_with = "null_as_default")]
    pub status_description: String,
    /// Test table URL, set together with `tests` on enrichment
    #[serde(skip)]
    pub source_url: Option<String>,
    /// Per-test breakdown, only present for enriched flaking/failing jobs
    #[serde(skip)]
    pub tests: Option<Vec<TestResult>>,
}

impl JobRecord {
    /// Create an un-enriched record with the given status.
    pub fn new(overall_status: JobStatus) -> Self {
        JobRecord {
            overall_status,
            alert: String::new(),
            last_run: 0,
            last_update: 0,
            latest_green: String::new(),
            status_icon: String::new(),
            status_description: String::new(),
            source_url: None,
            tests: None,
        }
    }

    /// Attach the full test list and the URL it was fetched from.
    pub fn attach_tests(&mut self, source_url: String, tests: Vec<TestResult>) {
        self.source_url = Some(source_url);
        self.tests = Some(tests);
    }

    /// Whether test details have been attached.
    pub fn is_enriched(&self) -> bool {
        self.tests.is_some()
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
