//! Domain models for flake-tracker.

pub mod job_record;
pub mod report_row;
pub mod run;
pub mod snapshot;
pub mod test_result;

// Re-export commonly used types
pub use job_record::{JobRecord, JobStatus};
pub use report_row::ReportRow;
pub use run::{GroupReport, JobFailure, RunContext, RunSummary};
pub use snapshot::{JobMap, TabGroupSnapshot};
pub use test_result::{TestResult, TestRow, TestTable};
