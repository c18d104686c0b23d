//! Collection runs over one or more tab groups.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::CollectResult;
use crate::models::{GroupReport, RunContext, RunSummary};
use crate::services::classifier::collect_status;
use crate::services::enrichment::enrich_snapshot;
use crate::services::report::emit;
use crate::services::testgrid::TestGridClient;

/// Classify, enrich and report a single tab group.
///
/// Fails only when the summary cannot be collected; per-job failures are
/// carried in the returned report.
pub async fn run_group(
    client: &TestGridClient,
    group: &str,
    max_concurrent_fetches: usize,
) -> CollectResult<GroupReport> {
    let ctx = RunContext::new(group, Utc::now(), client.summary_url(group));

    let mut snapshot = collect_status(client, &ctx).await?;
    let failures = enrich_snapshot(client, &mut snapshot, &ctx, max_concurrent_fetches).await;
    let rows = emit(&snapshot);

    Ok(GroupReport {
        snapshot,
        rows,
        failures,
    })
}

/// Run every configured tab group in order.
pub async fn run_all(client: &TestGridClient, config: &Config) -> RunSummary {
    let mut summary = RunSummary::default();

    for group in &config.tab_groups {
        match run_group(client, group, config.max_concurrent_fetches).await {
            Ok(report) => {
                if !report.failures.is_empty() {
                    warn!(
                        group = %group,
                        failed_jobs = report.failures.len(),
                        "Report is missing test details for some jobs"
                    );
                }
                info!(group = %group, rows = report.rows.len(), "Tab group report complete");
                summary.reports.push(report);
            }
            Err(e) => {
                error!(group = %group, url = %e.url(), "Tab group collection failed: {}", e);
                summary.failed_groups.push((group.clone(), e));
            }
        }
    }

    summary
}
