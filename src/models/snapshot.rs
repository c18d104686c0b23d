//! Point-in-time status of one TestGrid tab group.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{JobRecord, JobStatus};

/// Jobs keyed by name.
pub type JobMap = BTreeMap<String, JobRecord>;

/// Result of one collection run against a tab group.
///
/// A job name appears in at most one of the three buckets. Jobs whose
/// status is none of flaky, failing or passing are only counted in `count`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabGroupSnapshot {
    pub name: String,
    pub collected_at: DateTime<Utc>,
    pub summary_url: String,
    /// Number of jobs in the summary, including excluded ones
    pub count: usize,
    pub flaking: JobMap,
    pub failing: JobMap,
    pub passing: JobMap,
}

impl TabGroupSnapshot {
    /// Create an empty snapshot.
    pub fn new(name: &str, collected_at: DateTime<Utc>, summary_url: &str) -> Self {
        TabGroupSnapshot {
            name: name.to_string(),
            collected_at,
            summary_url: summary_url.to_string(),
            count: 0,
            flaking: JobMap::new(),
            failing: JobMap::new(),
            passing: JobMap::new(),
        }
    }

    /// Bucket holding jobs of the given status, if it has one.
    pub fn bucket(&self, status: &JobStatus) -> Option<&JobMap> {
        match status {
            JobStatus::Flaky => Some(&self.flaking),
            JobStatus::Failing => Some(&self.failing),
            JobStatus::Passing => Some(&self.passing),
            JobStatus::Other(_) => None,
        }
    }

    /// Mutable access to the bucket holding jobs of the given status.
    pub fn bucket_mut(&mut self, status: &JobStatus) -> Option<&mut JobMap> {
        match status {
            JobStatus::Flaky => Some(&mut self.flaking),
            JobStatus::Failing => Some(&mut self.failing),
            JobStatus::Passing => Some(&mut self.passing),
            JobStatus::Other(_) => None,
        }
    }

    /// Look up a job in whichever bucket holds it.
    pub fn job(&self, name: &str) -> Option<&JobRecord> {
        self.flaking
            .get(name)
            .or_else(|| self.failing.get(name))
            .or_else(|| self.passing.get(name))
    }

    /// Number of jobs placed in one of the three buckets.
    pub fn partitioned_count(&self) -> usize {
        self.flaking.len() + self.failing.len() + self.passing.len()
    }

    /// Names of the jobs whose test tables should be fetched, flaking first.
    pub fn jobs_needing_details(&self) -> Vec<(JobStatus, String)> {
        [
            (JobStatus::Flaky, &self.flaking),
            (JobStatus::Failing, &self.failing),
            (JobStatus::Passing, &self.passing),
        ]
        .into_iter()
        .filter(|(status, _)| status.needs_test_details())
        .flat_map(|(status, bucket)| {
            bucket
                .keys()
                .map(move |name| (status.clone(), name.clone()))
        })
        .collect()
    }
}
