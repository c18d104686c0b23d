//! Report emission from a classified snapshot.

use std::io::{self, Write};

use crate::models::{JobMap, JobRecord, ReportRow, TabGroupSnapshot, TestResult};

/// Flatten a snapshot into report rows.
///
/// Flaking jobs come first, then failing, then passing. Within a bucket jobs
/// are ordered by name and tests by name. Flaking and failing jobs produce
/// one row per test (none when un-enriched); passing jobs produce exactly
/// one row with empty sig and test.
pub fn emit(snapshot: &TabGroupSnapshot) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    emit_tests(snapshot, &snapshot.flaking, &mut rows);
    emit_tests(snapshot, &snapshot.failing, &mut rows);

    for (job, record) in &snapshot.passing {
        rows.push(row(snapshot, job, record, None));
    }

    rows
}

fn emit_tests(snapshot: &TabGroupSnapshot, bucket: &JobMap, rows: &mut Vec<ReportRow>) {
    for (job, record) in bucket {
        let Some(tests) = &record.tests else {
            continue;
        };

        let mut sorted: Vec<&TestResult> = tests.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        rows.extend(
            sorted
                .into_iter()
                .map(|test| row(snapshot, job, record, Some(test))),
        );
    }
}

fn row(
    snapshot: &TabGroupSnapshot,
    job: &str,
    record: &JobRecord,
    test: Option<&TestResult>,
) -> ReportRow {
    ReportRow {
        collected_at: snapshot.collected_at,
        status: record.overall_status.to_string(),
        job: job.to_string(),
        sig: test.map(|t| t.sig.clone()).unwrap_or_default(),
        test: test.map(|t| t.name.clone()).unwrap_or_default(),
        url: record.source_url.clone().unwrap_or_default(),
    }
}

/// Write one CSV line per row.
pub fn write_report<W: Write>(rows: &[ReportRow], writer: &mut W) -> io::Result<()> {
    for row in rows {
        writeln!(writer, "{}", row.to_csv_line())?;
    }
    writer.flush()
}
