//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Bounded concurrency and completion delivery
//! - Overall crawl coordination and termination

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::{run_crawl, should_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, FetchOutcome, Fetcher};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::state::CrawlState;
use crate::CartographerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and scheduler
/// 2. Fetch the seed URL
/// 3. Extract and follow same-host links and stylesheets
/// 4. Return the crawl state once no fetch is left in flight
///
/// # Returns
///
/// * `Ok(CrawlState)` - Every URL seen, with its resource or a placeholder
/// * `Err(CartographerError)` - The crawl could not be started
pub async fn crawl(config: &Config) -> Result<CrawlState, CartographerError> {
    run_crawl(config).await
}
