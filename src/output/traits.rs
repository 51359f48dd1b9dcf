//! Renderer trait and error types
//!
//! Renderers consume the finished crawl state read-only; they run after the
//! crawl loop has returned and can never change what was crawled.

use crate::state::CrawlState;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for sitemap renderers
pub trait SitemapRenderer {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Writes this renderer's artifacts for the crawl
    ///
    /// Returns the paths of the files written.
    fn render(&self, crawled: &CrawlState) -> OutputResult<Vec<PathBuf>>;
}
