use serde::Deserialize;
use std::time::Duration;

/// Seed used when no URL is given on the command line or in the config file
pub const DEFAULT_SEED_URL: &str = "http://news.ycombinator.com/";

/// Default ceiling on concurrently running fetches
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 20;

/// Main configuration structure for Site-Cartographer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub output: OutputConfig,
}

/// Crawl scope and concurrency
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("site-cartographer/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Exponential backoff applied to transient fetch failures
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before the first retry (milliseconds)
    #[serde(rename = "initial-interval-ms")]
    pub initial_interval_ms: u64,

    /// Factor applied to the delay after every failed attempt
    pub multiplier: f64,

    /// Upper bound for a single delay (milliseconds)
    #[serde(rename = "max-interval-ms")]
    pub max_interval_ms: u64,

    /// Total time budget across all attempts for one URL (milliseconds)
    #[serde(rename = "max-elapsed-ms")]
    pub max_elapsed_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 500,
            multiplier: 1.5,
            max_interval_ms: 10_000,
            max_elapsed_ms: 60_000,
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the given number of failed attempts (1-based)
    pub fn delay_after(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(64) as i32;
        let millis = self.initial_interval_ms as f64 * self.multiplier.powi(exponent);
        let capped = millis.min(self.max_interval_ms as f64);
        Duration::from_millis(capped as u64)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_millis(self.max_elapsed_ms)
    }
}

/// Sitemap renderer settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the sitemap artifacts are written into
    pub directory: String,

    /// Write the plain-text sitemap
    pub text: bool,

    /// Write the Graphviz sitemap
    pub graphviz: bool,

    /// Graph layout executable used to render the .dot file
    #[serde(rename = "dot-command")]
    pub dot_command: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "out".to_string(),
            text: true,
            graphviz: true,
            dot_command: "dot".to_string(),
        }
    }
}
