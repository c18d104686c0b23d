//! Test table model representing individual test entries of a job.

use serde::{Deserialize, Deserializer, Serialize};

use crate::services::sig::tag_sig;

/// Test table document returned by the TestGrid table endpoint.
///
/// Only the fields used by the report are modelled; everything else in the
/// upstream document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestTable {
    #[serde(rename = "test-group-name", default)]
    pub test_group_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tests: Vec<TestRow>,
}

/// One raw row of the test table.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRow {
    pub name: String,
    #[serde(rename = "original-name", default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// A test entry of a flaking or failing job, tagged with its sig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Display name
    pub name: String,
    /// Unfiltered name as recorded by the test runner
    pub original_name: String,
    /// Ownership label, `job-owner` when the name carries no sig marker
    pub sig: String,
    /// Test target, when the table reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TestResult {
    /// Create a test result, deriving the sig from the display name.
    pub fn new(name: String, original_name: String, target: Option<String>) -> Self {
        let sig = tag_sig(&name);
        TestResult {
            name,
            original_name,
            sig,
            target,
        }
    }
}

impl From<TestRow> for TestResult {
    fn from(row: TestRow) -> Self {
        let original_name = row.original_name.unwrap_or_else(|| row.name.clone());
        TestResult::new(row.name, original_name, row.target)
    }
}

impl TestTable {
    /// Convert every row into a tagged test result, keeping table order.
    pub fn into_results(self) -> Vec<TestResult> {
        self.tests.into_iter().map(TestResult::from).collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TestRow>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TestRow>>::deserialize(deserializer)?.unwrap_or_default())
}
