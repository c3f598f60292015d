//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pool, including:
//! - Building the shared HTTP client with the identifying user agent and timeout
//! - GET requests for listing pages
//! - Racing every request against the cancellation token
//! - Error classification (transport, timeout, status, body decode)

use crate::config::SiteConfig;
use crate::PageError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Upper bound for establishing a connection, independent of the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds an HTTP client with proper configuration
///
/// The client is cheap to clone and shared read-only by every worker.
///
/// # Arguments
///
/// * `site` - The site configuration (provides the user agent)
/// * `timeout` - Per-request timeout bounding a single fetch
///
/// # Example
///
/// ```no_run
/// use hn_sweep::config::SiteConfig;
/// use hn_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&SiteConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(site: &SiteConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(site.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing documents
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns its body
    ///
    /// # Request Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 200 | body text |
    /// | any other status | `PageError::Status` |
    /// | request timeout | `PageError::Timeout` |
    /// | DNS / connection failure | `PageError::Transport` |
    /// | body not decodable | `PageError::Parse` |
    /// | token cancelled before or during the call | `PageError::Cancelled` |
    ///
    /// Cancellation drops the in-flight request future, which aborts the connection
    /// instead of waiting for the network timeout.
    pub async fn fetch(&self, url: &Url, cancel: &CancellationToken) -> Result<String, PageError> {
        if cancel.is_cancelled() {
            return Err(PageError::Cancelled {
                url: url.to_string(),
            });
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Fetch of {} cancelled", url);
                Err(PageError::Cancelled { url: url.to_string() })
            }
            result = self.get(url) => result,
        }
    }

    async fn get(&self, url: &Url) -> Result<String, PageError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            // Dropping the response releases the connection without reading the body
            return Err(PageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_decode() {
                PageError::Parse {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                classify_error(url, e)
            }
        })
    }
}

/// Maps a reqwest error onto the page error taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> PageError {
    if error.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
