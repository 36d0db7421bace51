//! HTTP fetcher implementation
//!
//! This module handles every request the harvester makes:
//! - Building the HTTP client with the configured user agent and timeout
//! - A single GET per page, with no retries
//! - Classifying failures into `FetchError`

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Something that can turn a URL into a page body
///
/// The pagination loop only depends on this trait, so a retrying or caching
/// fetcher can be dropped in without touching it.
pub trait PageFetcher {
    /// Fetches `url` and returns the response body
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::CrawlerConfig;
/// use listing_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from crawler settings
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    /// Issues one GET
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx, any Content-Type | body |
    /// | non-2xx status | `FetchError::Status` |
    /// | body not valid in its charset | `FetchError::Undecodable` |
    /// | timeout, DNS, connect, body read | `FetchError::Transport` |
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let charset = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(declared_charset);

        // reqwest transcodes declared legacy charsets (Shift_JIS, EUC-JP) itself
        if charset.as_deref().is_some_and(|c| !is_utf8(c)) {
            return response.text().await.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Undecodable {
            url: url.to_string(),
            message: format!("invalid UTF-8: {}", e.utf8_error()),
        })
    }
}

/// Extracts the `charset` parameter from a Content-Type value, lowercased
fn declared_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_ascii_lowercase())
    })
}

fn is_utf8(charset: &str) -> bool {
    matches!(charset, "utf-8" | "utf8")
}
