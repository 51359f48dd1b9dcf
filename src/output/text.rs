//! Plain-text sitemap
//!
//! One block per crawled URL, in URL order, with its links and assets
//! sorted beneath it.

use crate::output::traits::{OutputError, OutputResult, SitemapRenderer};
use crate::state::CrawlState;
use crate::url::host_label;
use std::fs;
use std::path::PathBuf;

/// Writes `<root-host>.txt` into the output directory
#[derive(Debug, Clone)]
pub struct TextSitemap {
    output_dir: PathBuf,
}

impl TextSitemap {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl SitemapRenderer for TextSitemap {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, crawled: &CrawlState) -> OutputResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self
            .output_dir
            .join(format!("{}.txt", host_label(crawled.root())));
        fs::write(&path, format_text_sitemap(crawled)).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(vec![path])
    }
}

/// Formats the crawl state as a deterministic text report
///
/// ```text
/// http://example.com/
///     Links:
///         http://example.com/about
///     Assets:
///         http://example.com/logo.png
/// ```
///
/// (Indentation is written as tabs.)
pub fn format_text_sitemap(crawled: &CrawlState) -> String {
    let mut text = String::new();

    for (url, resource) in crawled.iter() {
        text.push_str(url.as_str());
        text.push('\n');

        text.push_str("\tLinks:\n");
        for link in resource.sorted_links() {
            text.push_str(&format!("\t\t{}\n", link));
        }

        text.push_str("\tAssets:\n");
        for asset in resource.sorted_assets() {
            text.push_str(&format!("\t\t{}\n", asset));
        }
    }

    text
}
