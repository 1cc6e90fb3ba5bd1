// file: src/scraper/client.rs
// description: reader proxy client returning rendered page text
// reference: https://jina.ai/reader

use crate::config::ScraperConfig;
use crate::error::{Result, SearchError};
use crate::utils::Validator;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct ReaderClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReaderClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Validator::validate_url(&config.reader_base_url)?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.reader_base_url.clone(),
            timeout,
        })
    }

    pub fn reader_url(&self, url: &str) -> String {
        format!("{}{}", self.base_url, url)
    }

    /// Fetch the rendered text of `url`.
    pub async fn scrape(&self, url: &str) -> Result<String> {
        Validator::validate_url(url)?;

        let reader_url = self.reader_url(url);
        debug!("Requesting {} (timeout {:?})", reader_url, self.timeout);

        let upstream = |message: String| SearchError::UpstreamFetch {
            url: url.to_string(),
            message,
        };

        let response = self.client.get(&reader_url).send().await.map_err(|e| {
            if e.is_timeout() {
                upstream(format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                upstream(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(upstream(format!("status {}: {}", status, body.trim())));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                upstream(format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                upstream(e.to_string())
            }
        })?;

        debug!("Fetched {} chars for {}", text.len(), url);
        Ok(text)
    }
}
