//! HTML reference extraction
//!
//! This module walks an HTML document and collects:
//! - Links to follow (from `<a href>`)
//! - Assets: stylesheets, images, scripts, and URLs inside CSS
//!
//! References are returned as written; resolution happens in `crate::url`.

use crate::parse::{parse_css, ParsedPage};
use scraper::node::Element;
use scraper::{Html, Selector};

/// Parses HTML content and extracts link and asset references
///
/// # Extraction Rules
///
/// **Links:**
/// - `<a href="...">`
///
/// **Assets:**
/// - `<link rel="stylesheet" href="...">`, skipping alternates and feeds
/// - `<img src="...">` and `<script src="...">`
/// - `url(...)` and `@import` references inside `<style>` elements
/// - `url(...)` references inside any `style="..."` attribute
///
/// Self-closing and open-tag forms are treated the same. Values that do not
/// parse as URL references are dropped individually. The parser never
/// fails: malformed markup yields whatever references could be recovered.
///
/// # Example
///
/// ```
/// use site_cartographer::parse::parse_html;
///
/// let page = parse_html(r#"<a href="/about">About</a><img src="logo.png" />"#);
/// assert!(page.links.contains("/about"));
/// assert!(page.assets.contains("logo.png"));
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!(
            "Tolerated {} HTML parse errors during extraction",
            document.errors.len()
        );
    }

    let mut page = ParsedPage::default();

    extract_links(&document, &mut page);
    extract_stylesheets(&document, &mut page);
    extract_sources(&document, &mut page);
    extract_style_elements(&document, &mut page);
    extract_style_attributes(&document, &mut page);

    page
}

fn extract_links(document: &Html, page: &mut ParsedPage) {
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                page.add_link(href);
            }
        }
    }
}

fn extract_stylesheets(document: &Html, page: &mut ParsedPage) {
    if let Ok(selector) = Selector::parse("link[href]") {
        for element in document.select(&selector) {
            if !is_stylesheet(element.value()) {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                page.add_asset(href);
            }
        }
    }
}

/// Returns true for `<link>` elements that load a stylesheet
///
/// `rel` must contain the `stylesheet` token and must not contain
/// `alternate`; feed types (RSS/Atom) are rejected outright.
fn is_stylesheet(link: &Element) -> bool {
    let rel = link.attr("rel").unwrap_or("");
    let mut has_stylesheet = false;
    for token in rel.split_ascii_whitespace() {
        if token.eq_ignore_ascii_case("alternate") {
            return false;
        }
        if token.eq_ignore_ascii_case("stylesheet") {
            has_stylesheet = true;
        }
    }

    let is_feed = link.attr("type").is_some_and(|t| {
        let t = t.to_ascii_lowercase();
        t.contains("rss") || t.contains("atom")
    });

    has_stylesheet && !is_feed
}

fn extract_sources(document: &Html, page: &mut ParsedPage) {
    if let Ok(selector) = Selector::parse("img[src], script[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                page.add_asset(src);
            }
        }
    }
}

fn extract_style_elements(document: &Html, page: &mut ParsedPage) {
    if let Ok(selector) = Selector::parse("style") {
        for element in document.select(&selector) {
            let css: String = element.text().collect();
            if css.trim().is_empty() {
                continue;
            }
            for reference in parse_css(&css) {
                page.assets.insert(reference);
            }
        }
    }
}

fn extract_style_attributes(document: &Html, page: &mut ParsedPage) {
    if let Ok(selector) = Selector::parse("[style]") {
        for element in document.select(&selector) {
            if let Some(style) = element.value().attr("style") {
                for reference in parse_css(style) {
                    page.assets.insert(reference);
                }
            }
        }
    }
}
