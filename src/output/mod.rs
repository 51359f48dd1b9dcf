//! Output module for writing sitemaps
//!
//! This module handles:
//! - A plain-text report of every crawled URL with its links and assets
//! - A Graphviz graph of the site, rendered to PDF when Graphviz is installed
//!
//! Renderers run after the crawl has finished. A failing renderer is logged
//! and never affects the other renderers or the crawl result.

mod graphviz;
mod text;
mod traits;

pub use graphviz::{build_dot, build_graph, EdgeKind, GraphvizSitemap, ResourceKind};
pub use text::{format_text_sitemap, TextSitemap};
pub use traits::{OutputError, OutputResult, SitemapRenderer};

use crate::config::OutputConfig;
use crate::state::CrawlState;
use std::path::PathBuf;

/// Builds the renderers enabled in the output configuration
pub fn build_renderers(config: &OutputConfig) -> Vec<Box<dyn SitemapRenderer>> {
    let mut renderers: Vec<Box<dyn SitemapRenderer>> = Vec::new();

    if config.text {
        renderers.push(Box::new(TextSitemap::new(&config.directory)));
    }
    if config.graphviz {
        renderers.push(Box::new(GraphvizSitemap::new(
            &config.directory,
            &config.dot_command,
        )));
    }

    renderers
}

/// Runs every renderer over the crawl, returning all files written
pub fn render_all(renderers: &[Box<dyn SitemapRenderer>], crawled: &CrawlState) -> Vec<PathBuf> {
    let mut written = Vec::new();

    for renderer in renderers {
        match renderer.render(crawled) {
            Ok(paths) => {
                for path in &paths {
                    tracing::info!("{} sitemap written to {}", renderer.name(), path.display());
                }
                written.extend(paths);
            }
            Err(e) => {
                tracing::error!("{} sitemap failed: {}", renderer.name(), e);
            }
        }
    }

    written
}
