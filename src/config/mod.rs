//! Configuration module for Site-Cartographer
//!
//! Configuration comes from an optional TOML file, then command-line
//! overrides, and is validated before the crawl starts. The resulting value
//! is passed explicitly to the coordinator and fetcher.
//!
//! # Example
//!
//! ```no_run
//! use site_cartographer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cartographer.toml")).unwrap();
//! println!("Crawling with {} fetchers", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, RetryConfig, DEFAULT_MAX_CONCURRENT_FETCHES,
    DEFAULT_SEED_URL,
};

pub use parser::{load_config, parse_config};
pub use validation::{parse_seed_url, validate};
