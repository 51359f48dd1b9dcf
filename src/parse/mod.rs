//! Resource extractors
//!
//! HTML and CSS are scanned for the URL references that drive further
//! crawling. Extraction never fails outright; bad references are dropped
//! one at a time and malformed documents yield partial results.

mod css;
mod html;

pub use css::{parse_css, CssError};
pub use html::parse_html;

use crate::url::parse_reference;
use std::collections::BTreeSet;

/// References extracted from one document, still relative as written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Navigable page references
    pub links: BTreeSet<String>,

    /// Static asset references
    pub assets: BTreeSet<String>,
}

impl ParsedPage {
    /// Builds a page whose only references are CSS assets
    pub fn from_css(css: &str) -> Self {
        Self {
            links: BTreeSet::new(),
            assets: parse_css(css).into_iter().collect(),
        }
    }

    pub fn add_link(&mut self, raw: &str) {
        if let Some(reference) = checked_reference(raw) {
            self.links.insert(reference);
        }
    }

    pub fn add_asset(&mut self, raw: &str) {
        if let Some(reference) = checked_reference(raw) {
            self.assets.insert(reference);
        }
    }
}

fn checked_reference(raw: &str) -> Option<String> {
    match parse_reference(raw) {
        Ok(reference) => reference,
        Err(e) => {
            tracing::debug!("Skipping unparseable reference {:?}: {}", raw, e);
            None
        }
    }
}
