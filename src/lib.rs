//! Site-Cartographer: a single-host site mapper
//!
//! This crate crawls one web host from a seed URL, following same-host links
//! and stylesheet references, and produces a map from every discovered URL to
//! the links and assets found there.

pub mod config;
pub mod crawler;
pub mod output;
pub mod parse;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Cartographer operations
#[derive(Debug, Error)]
pub enum CartographerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Scheduler closed while {0} fetches were in flight")]
    SchedulerClosed(usize),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Site-Cartographer operations
pub type Result<T> = std::result::Result<T, CartographerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use state::{CrawlState, Resource};
