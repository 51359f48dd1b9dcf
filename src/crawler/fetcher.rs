//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from configuration
//! - GET requests with exponential-backoff retry on transient failures
//! - Dispatching the body to the CSS or HTML extractor
//! - Normalizing the extracted resource

use crate::config::{HttpConfig, RetryConfig};
use crate::parse::{parse_html, ParsedPage};
use crate::state::Resource;
use crate::url::{is_css, normalize_page};
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Result of one fetch, delivered to the coordinator
#[derive(Debug)]
pub enum FetchOutcome {
    /// The URL was fetched and its references extracted and normalized
    Fetched(Resource),

    /// The fetch failed permanently or exhausted its retries
    Abandoned(Url),
}

/// Failure of a single request attempt
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading body of {url} failed: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Returns true if another attempt may succeed
    ///
    /// | Condition | Transient |
    /// |-----------|-----------|
    /// | Connection refused, reset, timeout | yes |
    /// | HTTP 429, HTTP 5xx | yes |
    /// | Malformed request, redirect loop | no |
    /// | Body read failure | no |
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request { source, .. } => !source.is_builder() && !source.is_redirect(),
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || (500..600).contains(status)
            }
            Self::Body { .. } => false,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_cartographer::config::HttpConfig;
/// use site_cartographer::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves single URLs and turns them into normalized resources
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryConfig,
}

impl Fetcher {
    pub fn new(http: &HttpConfig, retry: RetryConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(http)?, retry))
    }

    pub fn with_client(client: Client, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Fetches a URL and extracts its resource
    ///
    /// # Request Flow
    ///
    /// 1. GET the URL, retrying transient failures with exponential backoff
    /// 2. If the path ends in `.css`, read the whole body and scan it as CSS
    /// 3. Otherwise read the body as HTML (a body cut short is still parsed)
    /// 4. Normalize the references against the URL
    ///
    /// Failures are logged here and reported as `Abandoned`; they never
    /// propagate as errors.
    pub async fn fetch(&self, url: Url) -> FetchOutcome {
        let response = match self.get_with_retry(&url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Abandoning {}: {}", url, e);
                return FetchOutcome::Abandoned(url);
            }
        };

        let page = if is_css(&url) {
            match response.text().await {
                Ok(body) => ParsedPage::from_css(&body),
                Err(source) => {
                    let e = FetchError::Body {
                        url: url.to_string(),
                        source,
                    };
                    tracing::warn!("Abandoning {}: {}", url, e);
                    return FetchOutcome::Abandoned(url);
                }
            }
        } else {
            parse_html(&read_html_body(&url, response).await)
        };

        FetchOutcome::Fetched(normalize_page(&url, &page))
    }

    async fn get_with_retry(&self, url: &Url) -> Result<Response, FetchError> {
        let started = Instant::now();
        let mut failures: u32 = 0;

        loop {
            let error = match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        FetchError::Status {
                            url: url.to_string(),
                            status: status.as_u16(),
                        }
                    } else {
                        if !status.is_success() {
                            tracing::debug!("{} answered HTTP {}, parsing body anyway", url, status);
                        }
                        return Ok(response);
                    }
                }
                Err(source) => FetchError::Request {
                    url: url.to_string(),
                    source,
                },
            };

            if !error.is_transient() {
                return Err(error);
            }

            failures += 1;
            let delay = self.retry.delay_after(failures);
            if started.elapsed() + delay > self.retry.max_elapsed() {
                tracing::debug!("Retry budget for {} exhausted after {} attempts", url, failures);
                return Err(error);
            }

            tracing::debug!(
                "Attempt {} for {} failed ({}), retrying in {:?}",
                failures,
                url,
                error,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Reads an HTML body chunk by chunk, keeping whatever arrived before an error
async fn read_html_body(url: &Url, mut response: Response) -> String {
    let mut body = Vec::new();

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(source) => {
                let e = FetchError::Body {
                    url: url.to_string(),
                    source,
                };
                tracing::warn!("{}; parsing the {} bytes received", e, body.len());
                break;
            }
        }
    }

    String::from_utf8_lossy(&body).into_owned()
}
