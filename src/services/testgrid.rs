//! TestGrid HTTP client.
//!
//! Fetches the tab group summary and per-job test tables. Every request is
//! bounded by a connect timeout and a total timeout; transport failures,
//! timeouts and non-2xx responses map to [`CollectError::Fetch`], bodies that
//! do not parse map to [`CollectError::Parse`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::error::{CollectError, CollectResult};
use crate::models::{JobRecord, TestTable};

/// Client for one TestGrid instance.
#[derive(Clone)]
pub struct TestGridClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl TestGridClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("flake-tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Summary URL of a tab group.
    pub fn summary_url(&self, group: &str) -> String {
        format!("{}/{}/summary", self.base_url, group)
    }

    /// Test table URL of a job. The group serves as both dashboard and tab
    /// owner; the job name is percent-encoded.
    pub fn table_url(&self, group: &str, job: &str) -> String {
        format!(
            "{}/{}/table?tab={}&width=5&exclude-non-failed-tests=&sort-by-flakiness=&dashboard={}",
            self.base_url,
            group,
            urlencoding::encode(job),
            urlencoding::encode(group)
        )
    }

    /// Fetch the job status summary of a tab group.
    pub async fn fetch_summary(&self, group: &str) -> CollectResult<BTreeMap<String, JobRecord>> {
        let url = self.summary_url(group);
        self.get_json(&url).await
    }

    /// Fetch the test table of a job, returning the URL it came from.
    pub async fn fetch_test_table(
        &self,
        group: &str,
        job: &str,
    ) -> CollectResult<(String, TestTable)> {
        let url = self.table_url(group, job);
        let table = self.get_json(&url).await?;
        Ok((url, table))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CollectResult<T> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CollectError::fetch(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CollectError::fetch(url, &e))?;

        serde_json::from_slice(&body).map_err(|e| CollectError::parse(url, &e))
    }
}
