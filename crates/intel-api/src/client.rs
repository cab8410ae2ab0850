//! Intel server HTTP client

use crate::error::{IntelError, Result};
use crate::types::LegalRecord;
use std::time::Duration;

/// Client for the intel server's legal-records API
///
/// No ordering of returned records is guaranteed; callers that care about
/// order must sort.
pub struct IntelClient {
    http: reqwest::Client,
    base_url: String,
}

impl IntelClient {
    /// Default intel server endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://intel.cmdr-tools.net";

    /// Create a client against the default endpoint (30 second timeout)
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch legal records for a commander covering the trailing
    /// `window_seconds` seconds
    ///
    /// A commander unknown to the server yields an empty vec, not an error.
    ///
    /// # Arguments
    /// * `cmdr_id` - Commander identifier
    /// * `window_seconds` - How far back the records should reach
    pub async fn legal_records(
        &self,
        cmdr_id: &str,
        window_seconds: u64,
    ) -> Result<Vec<LegalRecord>> {
        let url = format!(
            "{}/v1/cmdrs/{}/legal-records?window={}",
            self.base_url,
            urlencoding::encode(cmdr_id),
            window_seconds
        );

        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !response.status().is_success() {
            return Err(IntelError::Api(format!(
                "intel server returned status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

impl Default for IntelClient {
    fn default() -> Self {
        Self::new()
    }
}
