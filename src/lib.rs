//! flake-tracker library.
//!
//! Collects job status from TestGrid tab groups, enriches flaking and
//! failing jobs with their test tables, and flattens the result into a
//! per-test report.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
