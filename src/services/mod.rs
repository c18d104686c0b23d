//! Collection pipeline services.

pub mod classifier;
pub mod enrichment;
pub mod report;
pub mod runner;
pub mod sig;
pub mod testgrid;

pub use classifier::{collect_status, partition};
pub use enrichment::{EnrichedJob, enrich_job, enrich_snapshot};
pub use report::{emit, write_report};
pub use runner::{run_all, run_group};
pub use sig::tag_sig;
pub use testgrid::TestGridClient;
