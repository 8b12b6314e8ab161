use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; GEOAuditTool/1.0)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Thin HTTP wrapper shared by the URL and WordPress sources: browser-ish
/// user agent (some WP hosts reject unknown agents) and a hard timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        HttpClient {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// GET a page as text. reqwest handles charset detection from headers.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        info!(url, "Fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} returned an error status"))?;
        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {url}"))
    }

    /// GET and parse a JSON payload.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let raw = self.get_text(url).await?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON from {url}"))
    }
}
