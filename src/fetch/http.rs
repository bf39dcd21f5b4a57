//! HTTP Fetcher
//!
//! Real-network [`Fetcher`] implementation over an HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::fetch::Fetcher;

// == HTTP Fetcher ==
/// Fetches page content with a GET request.
///
/// Non-success statuses are errors; every request is bounded by the
/// configured timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
