//! E2E tests: per-job test detail enrichment.

use flake_tracker_lib::error::CollectError;
use flake_tracker_lib::services::{enrich_job, run_group};

use super::mock_testgrid::{MockResponse, MockTestGrid, TableRequest, summary, table};

const GROUP: &str = "sig-release-master-informing";

/// Flaking and failing jobs get tagged tests; passing jobs are never fetched.
#[actix_rt::test]
async fn test_flaking_and_failing_jobs_enriched() {
    let mock = MockTestGrid::start().await;
    mock.set_summary(
        GROUP,
        summary(&[
            ("flaky-job", "FLAKY"),
            ("failing-job", "FAILING"),
            ("passing-job", "PASSING"),
        ]),
    );
    mock.set_table(
        GROUP,
        "flaky-job",
        table(&["[sig-network] pods should have IP", "generic failure"]),
    );
    mock.set_table(GROUP, "failing-job", table(&["[sig-storage] CSI volume"]));

    let report = run_group(&mock.client(), GROUP, 4).await.unwrap();
    let snapshot = &report.snapshot;

    assert!(report.failures.is_empty());

    let flaky_tests = snapshot.flaking["flaky-job"].tests.as_ref().unwrap();
    assert_eq!(flaky_tests.len(), 2);
    assert_eq!(flaky_tests[0].sig, "sig-network");
    assert_eq!(flaky_tests[1].sig, "job-owner");
    assert_eq!(
        flaky_tests[0].original_name,
        "[sig-network] pods should have IP [Original]"
    );

    let failing = &snapshot.failing["failing-job"];
    assert_eq!(failing.tests.as_ref().unwrap()[0].sig, "sig-storage");
    assert!(
        failing
            .source_url
            .as_deref()
            .unwrap()
            .contains("tab=failing-job&width=5")
    );

    assert!(snapshot.passing["passing-job"].tests.is_none());
    assert!(snapshot.passing["passing-job"].source_url.is_none());

    let mut requested: Vec<String> = mock.table_requests().into_iter().map(|r| r.tab).collect();
    requested.sort();
    assert_eq!(requested, vec!["failing-job", "flaky-job"]);
}

/// The job name is percent-encoded and the group is sent as the dashboard.
#[actix_rt::test]
async fn test_table_query_parameters() {
    let mock = MockTestGrid::start().await;
    let job = "gce-cos-master-alpha features&more";
    mock.set_table(GROUP, job, table(&["Overall"]));

    let enriched = enrich_job(&mock.client(), GROUP, job).await.unwrap();

    assert_eq!(enriched.tests.len(), 1);
    assert!(enriched.source_url.contains("gce-cos-master-alpha%20features%26more"));
    assert_eq!(
        mock.table_requests(),
        vec![TableRequest {
            group: GROUP.to_string(),
            tab: job.to_string(),
            dashboard: GROUP.to_string(),
        }]
    );
}

/// One job's failure is recorded; the other jobs are still enriched.
#[actix_rt::test]
async fn test_failed_job_does_not_stop_enrichment() {
    let mock = MockTestGrid::start().await;
    mock.set_summary(
        GROUP,
        summary(&[
            ("flaky-a", "FLAKY"),
            ("flaky-b", "FLAKY"),
            ("failing-c", "FAILING"),
        ]),
    );
    mock.set_table(GROUP, "flaky-a", table(&["test one"]));
    mock.set_table(GROUP, "flaky-b", MockResponse::Status(503));
    mock.set_table(GROUP, "failing-c", MockResponse::Raw("not json"));

    let report = run_group(&mock.client(), GROUP, 2).await.unwrap();

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].job, "flaky-b");
    assert!(matches!(report.failures[0].error, CollectError::Fetch { .. }));
    assert!(report.failures[0].url().contains("tab=flaky-b"));
    assert_eq!(report.failures[1].job, "failing-c");
    assert!(matches!(report.failures[1].error, CollectError::Parse { .. }));

    assert!(report.snapshot.flaking["flaky-a"].is_enriched());
    assert!(!report.snapshot.flaking["flaky-b"].is_enriched());
    assert!(!report.snapshot.failing["failing-c"].is_enriched());
    assert_eq!(report.rows.len(), 1);
}

/// An empty test table enriches the job with zero tests and zero rows.
#[actix_rt::test]
async fn test_empty_table_yields_no_rows() {
    let mock = MockTestGrid::start().await;
    mock.set_summary(GROUP, summary(&[("flaky-job", "FLAKY")]));
    mock.set_table(GROUP, "flaky-job", table(&[]));

    let report = run_group(&mock.client(), GROUP, 4).await.unwrap();

    assert_eq!(
        report.snapshot.flaking["flaky-job"].tests.as_ref().map(Vec::len),
        Some(0)
    );
    assert!(report.rows.is_empty());
}

/// Pool size does not change the result.
#[actix_rt::test]
async fn test_sequential_and_pooled_runs_agree() {
    let mock = MockTestGrid::start().await;
    let jobs: Vec<String> = (0..8).map(|i| format!("flaky-{}", i)).collect();
    let entries: Vec<(&str, &str)> = jobs.iter().map(|j| (j.as_str(), "FLAKY")).collect();
    mock.set_summary(GROUP, summary(&entries));
    for job in &jobs {
        mock.set_table(GROUP, job, table(&["[sig-apps] b", "[sig-apps] a"]));
    }

    let client = mock.client();
    let sequential = run_group(&client, GROUP, 1).await.unwrap();
    let pooled = run_group(&client, GROUP, 4).await.unwrap();

    let strip = |rows: &[flake_tracker_lib::models::ReportRow]| {
        rows.iter()
            .map(|r| (r.job.clone(), r.test.clone(), r.sig.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&sequential.rows), strip(&pooled.rows));
    assert_eq!(sequential.rows.len(), 16);
}
