//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator is the single task that owns the crawl state. Workers
//! never touch the map; they hand completed resources back over the
//! scheduler's completion queue and the coordinator records them, decides
//! what to crawl next, and detects when the crawl has gone quiet.

use crate::config::{parse_seed_url, validate, Config};
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::scheduler::Scheduler;
use crate::state::{CrawlState, Resource};
use crate::url::{is_css, same_host, strip_fragment};
use crate::{CartographerError, ConfigError};
use std::time::Instant;
use url::Url;

/// Returns true if `candidate` should be claimed and fetched
///
/// A URL is crawlable when its fragment-free form is not yet in the crawl
/// state and it sits on the same host as the root. The scheme is not part
/// of the comparison, so `http://` and `https://` forms of one path are
/// distinct entries that may both be crawled.
pub fn should_crawl(state: &CrawlState, root: &Url, candidate: &Url) -> bool {
    let candidate = strip_fragment(candidate);
    !state.contains(&candidate) && same_host(root, &candidate)
}

/// Main crawler coordinator structure
pub struct Coordinator {
    state: CrawlState,
    scheduler: Scheduler,
}

impl Coordinator {
    /// Creates a coordinator from validated configuration
    ///
    /// Fails if the configuration does not validate or the HTTP client
    /// cannot be built; nothing has been fetched at that point.
    pub fn new(config: &Config) -> Result<Self, CartographerError> {
        validate(config)?;
        let root = parse_seed_url(&config.crawler.seed_url)?;
        let fetcher = Fetcher::new(&config.http, config.retry.clone())?;
        Self::with_fetcher(&root, config.crawler.max_concurrent_fetches, fetcher)
    }

    /// Creates a coordinator around an already built fetcher
    ///
    /// At least one fetch slot is required, or the seed could never start.
    pub fn with_fetcher(
        root: &Url,
        max_concurrent_fetches: usize,
        fetcher: Fetcher,
    ) -> Result<Self, CartographerError> {
        if max_concurrent_fetches == 0 {
            return Err(ConfigError::Validation(
                "max-concurrent-fetches must be at least 1".to_string(),
            )
            .into());
        }

        Ok(Self {
            state: CrawlState::new(root),
            scheduler: Scheduler::new(max_concurrent_fetches, fetcher),
        })
    }

    /// Runs the crawl to quiescence and returns the final crawl state
    ///
    /// 1. Fetch the root URL as the first worker
    /// 2. Take completed fetches in arrival order and record them
    /// 3. Launch fetches for new same-host links and `.css` assets
    /// 4. Stop once every slot is free and nothing is left in the queue
    pub async fn run(mut self) -> Result<CrawlState, CartographerError> {
        let root = self.state.root().clone();
        tracing::info!(
            "Starting crawl of {} with up to {} concurrent fetches",
            root,
            self.scheduler.capacity()
        );

        let start_time = Instant::now();
        let mut processed: usize = 0;

        let permit = self.scheduler.acquire().await?;
        self.scheduler.spawn(root, permit);

        loop {
            let outcome = self.scheduler.next_completion().await?;
            self.process(outcome).await?;
            processed += 1;

            if processed % 100 == 0 {
                self.log_progress(processed, start_time);
            }

            // Queued outcomes keep their slot taken, so all slots free with
            // nothing parked means no fetch is running and none is queued.
            if self.scheduler.is_quiescent() {
                break;
            }
        }

        tracing::info!(
            "Crawl completed: {} URLs seen, {} outcomes processed in {:?}",
            self.state.len(),
            processed,
            start_time.elapsed()
        );

        Ok(self.state)
    }

    async fn process(&mut self, outcome: FetchOutcome) -> Result<(), CartographerError> {
        match outcome {
            FetchOutcome::Fetched(resource) => self.record(resource).await,
            FetchOutcome::Abandoned(url) => {
                // The placeholder stays, so the URL is never tried again.
                tracing::warn!("Gave up on {}; it stays in the sitemap without references", url);
                Ok(())
            }
        }
    }

    async fn record(&mut self, resource: Resource) -> Result<(), CartographerError> {
        tracing::info!("Crawled {}", resource.url);

        let candidates: Vec<Url> = resource
            .links
            .iter()
            .chain(resource.assets.iter().filter(|asset| is_css(asset)))
            .cloned()
            .collect();

        self.state.record(resource);

        for candidate in candidates {
            if should_crawl(&self.state, self.state.root(), &candidate) {
                self.launch(strip_fragment(&candidate)).await?;
            }
        }

        Ok(())
    }

    /// Claims `url` and starts fetching it, waiting for a free slot first
    async fn launch(&mut self, url: Url) -> Result<(), CartographerError> {
        let permit = self.scheduler.acquire().await?;
        self.state.claim(&url);
        tracing::debug!("Claimed {} ({} in flight)", url, self.scheduler.in_flight());
        self.scheduler.spawn(url, permit);
        Ok(())
    }

    fn log_progress(&self, processed: usize, start_time: Instant) {
        let rate = processed as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        tracing::info!(
            "Progress: {} outcomes processed, {} URLs seen, {} in flight, {:.2} URLs/sec",
            processed,
            self.state.len(),
            self.scheduler.in_flight(),
            rate
        );
    }
}

/// Runs a complete crawl from configuration
///
/// # Example
///
/// ```no_run
/// use site_cartographer::config::Config;
/// use site_cartographer::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.crawler.seed_url = "https://example.com/".to_string();
/// let crawled = run_crawl(&config).await?;
/// println!("{} URLs mapped", crawled.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlState, CartographerError> {
    Coordinator::new(config)?.run().await
}
