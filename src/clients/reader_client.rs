//! Jina Reader client module
//!
//! Fetches a plain-text rendering of a web page through the reader service.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::JinaSumError;

pub const READER_TIMEOUT_SECS: u64 = 60;

/// The reader rejects requests that do not look like they come from a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Source of readable page text for a reader URL.
#[async_trait]
pub trait PageReader: Send + Sync {
    async fn fetch_page_text(&self, reader_url: &str) -> Result<String, JinaSumError>;
}

/// HTTP client for the Jina Reader service
pub struct JinaReaderClient {
    http: Client,
}

impl JinaReaderClient {
    /// # Errors
    ///
    /// Returns `FetchError` if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, JinaSumError> {
        Self::with_timeout(Duration::from_secs(READER_TIMEOUT_SECS))
    }

    /// # Errors
    ///
    /// Returns `FetchError` if the underlying HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, JinaSumError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JinaSumError::FetchError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageReader for JinaReaderClient {
    async fn fetch_page_text(&self, reader_url: &str) -> Result<String, JinaSumError> {
        info!("Fetching page text from {}", reader_url);

        let response = self
            .http
            .get(reader_url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| JinaSumError::FetchError(format!("Reader request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JinaSumError::FetchError(format!(
                "Reader returned HTTP {status} for {reader_url}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| JinaSumError::FetchError(format!("Failed to read reader body: {e}")))?;

        debug!("Reader returned {} bytes", text.len());
        Ok(text)
    }
}
