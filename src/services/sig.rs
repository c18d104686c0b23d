//! Sig tagging for test names.
//!
//! Kubernetes e2e tests carry their owning special interest group as a
//! bracketed marker such as `[sig-network] `. Tests without a marker are
//! attributed to the job owner.

use std::sync::LazyLock;

use regex::Regex;

/// Label for tests whose name carries no sig marker.
pub const JOB_OWNER: &str = "job-owner";

static SIG_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(sig-[^\]\s]+)\](?:\s|\[|$)").expect("sig marker pattern is valid")
});

/// Derive the sig label for a test name.
///
/// Returns the first marker's name without brackets (`sig-network`), or
/// [`JOB_OWNER`].
pub fn tag_sig(test_name: &str) -> String {
    SIG_MARKER
        .captures(test_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| JOB_OWNER.to_string())
}
