//! Retrying dashboard fetch client.

use super::models::{
    BootsResponse, BuildRecord, BuildsResponse, SummaryResponse, TestRecord, TestsResponse, Tree,
    TreeSummary,
};
use super::transport::{HttpTransport, UreqTransport};
use crate::config::KciConfig;
use crate::errors::{Result, ResultsError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Query identifying one tree checkout on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeQuery {
    pub origin: String,
    pub giturl: String,
    pub branch: String,
    pub commit: String,
    pub arch: Option<String>,
}

impl TreeQuery {
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("origin", self.origin.as_str()),
            ("git_url", self.giturl.as_str()),
            ("git_branch", self.branch.as_str()),
        ];
        if let Some(arch) = &self.arch {
            params.push(("filter_architecture", arch.as_str()));
        }
        params
    }

    fn endpoint(&self, kind: &str) -> String {
        format!("tree/{}/{}", self.commit, kind)
    }
}

/// Build `<base><endpoint>?k=v&...` with percent-encoded values.
pub fn build_url(base: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = String::with_capacity(base.len() + endpoint.len() + 64);
    url.push_str(base);
    if !base.ends_with('/') {
        url.push('/');
    }
    url.push_str(endpoint.trim_start_matches('/'));

    for (idx, (key, value)) in params.iter().enumerate() {
        url.push(if idx == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Client for the dashboard results API.
///
/// Retries immediately (no backoff) on the statuses listed in
/// [`crate::errors::RETRY_STATUS_CODES`], up to `max_retries` extra attempts.
/// Transport failures and API-reported errors are never retried.
pub struct DashboardClient<T: HttpTransport = UreqTransport> {
    transport: T,
    base_url: String,
    max_retries: u32,
}

impl DashboardClient<UreqTransport> {
    pub fn from_config(config: &KciConfig) -> Self {
        Self::new(UreqTransport::new(), &config.api_url, config.max_retries)
    }
}

impl<T: HttpTransport> DashboardClient<T> {
    pub fn new(transport: T, base_url: &str, max_retries: u32) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
            max_retries,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `endpoint` with `params` and decode the JSON body.
    pub fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = build_url(&self.base_url, endpoint, params);
        let mut retries = 0u32;

        loop {
            debug!(url = %url, attempt = retries + 1, "Fetching");
            let response = self
                .transport
                .get(&url)
                .map_err(|e| ResultsError::Network {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

            if ResultsError::is_retryable_status(response.status) {
                retries += 1;
                if retries <= self.max_retries {
                    warn!(url = %url, status = response.status, retries, "Retrying request");
                    continue;
                }
                return Err(ResultsError::RetriesExhausted {
                    status: response.status,
                    retries: self.max_retries,
                    url,
                });
            }

            if !response.is_success() {
                return Err(ResultsError::Http {
                    status: response.status,
                    url,
                });
            }

            let data: Value = serde_json::from_slice(&response.body).map_err(|e| {
                ResultsError::InvalidResponse {
                    url: url.clone(),
                    message: e.to_string(),
                }
            })?;

            if let Some(error) = data.get("error") {
                let message = match error {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(ResultsError::Api(message));
            }

            return Ok(data);
        }
    }

    fn fetch_as<R: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<R> {
        let value = self.fetch(endpoint, params)?;
        serde_json::from_value(value).map_err(|e| ResultsError::InvalidResponse {
            url: build_url(&self.base_url, endpoint, params),
            message: e.to_string(),
        })
    }

    pub fn tree_summary(&self, query: &TreeQuery) -> Result<TreeSummary> {
        let response: SummaryResponse =
            self.fetch_as(&query.endpoint("summary"), &query.params())?;
        Ok(response.summary)
    }

    pub fn tree_builds(&self, query: &TreeQuery) -> Result<Vec<BuildRecord>> {
        let response: BuildsResponse = self.fetch_as(&query.endpoint("builds"), &query.params())?;
        Ok(response.builds)
    }

    pub fn tree_boots(&self, query: &TreeQuery) -> Result<Vec<TestRecord>> {
        let response: BootsResponse = self.fetch_as(&query.endpoint("boots"), &query.params())?;
        Ok(response.boots)
    }

    pub fn tree_tests(&self, query: &TreeQuery) -> Result<Vec<TestRecord>> {
        let response: TestsResponse = self.fetch_as(&query.endpoint("tests"), &query.params())?;
        Ok(response.tests)
    }

    /// `GET tree-fast?origin=...`
    pub fn tree_list(&self, origin: &str) -> Result<Vec<Tree>> {
        self.fetch_as("tree-fast", &[("origin", origin)])
    }
}
