//! Status classification of a tab group's jobs.

use std::collections::BTreeMap;

use tracing::{Instrument, debug, error, info};

use crate::error::CollectResult;
use crate::models::{JobRecord, RunContext, TabGroupSnapshot};
use crate::services::testgrid::TestGridClient;

/// Fetch the summary of the run's tab group and partition its jobs.
///
/// Any fetch or parse failure aborts the group; no partial snapshot is
/// returned.
pub async fn collect_status(
    client: &TestGridClient,
    ctx: &RunContext,
) -> CollectResult<TabGroupSnapshot> {
    async {
        let jobs = client.fetch_summary(&ctx.group).await.map_err(|e| {
            error!(url = %e.url(), "Failed to collect job status summary: {}", e);
            e
        })?;

        let snapshot = partition(ctx, jobs);
        info!(
            total = snapshot.count,
            flaking = snapshot.flaking.len(),
            failing = snapshot.failing.len(),
            passing = snapshot.passing.len(),
            "Collected job status summary"
        );
        Ok(snapshot)
    }
    .instrument(ctx.span())
    .await
}

/// Partition summary jobs into the flaking, failing and passing buckets.
///
/// Jobs with any other status are counted but placed in no bucket.
pub fn partition(ctx: &RunContext, jobs: BTreeMap<String, JobRecord>) -> TabGroupSnapshot {
    let mut snapshot = TabGroupSnapshot::new(&ctx.group, ctx.collected_at, &ctx.summary_url);
    snapshot.count = jobs.len();

    for (name, record) in jobs {
        let status = record.overall_status.clone();
        match snapshot.bucket_mut(&status) {
            Some(bucket) => {
                bucket.insert(name, record);
            }
            None => debug!(job = %name, status = %status, "Job status not tracked"),
        }
    }

    snapshot
}
