//! Test detail enrichment for flaking and failing jobs.
//!
//! Each job's test table is fetched on a bounded pool of tokio tasks. A job
//! is written by exactly one task and the results are applied to the
//! snapshot after joining, so the snapshot itself is never shared.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{Instrument, info, info_span, warn};

use crate::error::{CollectError, CollectResult};
use crate::models::{JobFailure, JobStatus, RunContext, TabGroupSnapshot, TestResult};
use crate::services::testgrid::TestGridClient;

/// Test details collected for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedJob {
    pub source_url: String,
    pub tests: Vec<TestResult>,
}

/// Fetch and tag the test table of a single job.
pub async fn enrich_job(
    client: &TestGridClient,
    group: &str,
    job: &str,
) -> CollectResult<EnrichedJob> {
    let (source_url, table) = client.fetch_test_table(group, job).await?;
    Ok(EnrichedJob {
        source_url,
        tests: table.into_results(),
    })
}

/// Attach test details to every flaking and failing job of the snapshot.
///
/// A job whose table cannot be collected is logged, left un-enriched and
/// returned as a [`JobFailure`]; the remaining jobs still run. Passing jobs
/// are never touched.
pub async fn enrich_snapshot(
    client: &TestGridClient,
    snapshot: &mut TabGroupSnapshot,
    ctx: &RunContext,
    max_concurrent: usize,
) -> Vec<JobFailure> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let run_span = ctx.span();

    let handles: Vec<_> = snapshot
        .jobs_needing_details()
        .into_iter()
        .map(|(status, job)| {
            let client = client.clone();
            let group = ctx.group.clone();
            let semaphore = semaphore.clone();
            let task_job = job.clone();
            let span = info_span!(parent: &run_span, "enrich", job = %job, status = %status);

            let handle = tokio::spawn(
                async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        CollectError::Fetch {
                            url: client.table_url(&group, &task_job),
                            reason: format!("worker pool closed: {}", e),
                        }
                    })?;
                    enrich_job(&client, &group, &task_job).await
                }
                .instrument(span),
            );
            (status, job, handle)
        })
        .collect();

    let mut failures = Vec::new();
    let mut enriched = 0usize;

    for (status, job, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(CollectError::Fetch {
                url: client.table_url(&ctx.group, &job),
                reason: format!("enrichment task failed: {}", e),
            }),
        };

        match result {
            Ok(details) => {
                apply(snapshot, &status, &job, details);
                enriched += 1;
            }
            Err(error) => {
                warn!(
                    parent: &run_span,
                    job = %job,
                    status = %status,
                    url = %error.url(),
                    "Failed to collect job test results: {}",
                    error
                );
                failures.push(JobFailure { job, status, error });
            }
        }
    }

    info!(
        parent: &run_span,
        enriched,
        failed = failures.len(),
        "Collected test details for flaking and failing jobs"
    );

    failures
}

fn apply(snapshot: &mut TabGroupSnapshot, status: &JobStatus, job: &str, details: EnrichedJob) {
    if let Some(record) = snapshot
        .bucket_mut(status)
        .and_then(|bucket| bucket.get_mut(job))
    {
        record.attach_tests(details.source_url, details.tests);
    }
}
