//! URL handling module for Site-Cartographer
//!
//! This module decides work identity for the crawler: references are
//! resolved against their document, restricted to the document's host and
//! stripped of fragments, so that differently written URLs dedupe to the
//! same crawl-state entry.

mod host;
mod normalize;
mod reference;

pub use host::{host_label, same_host};
pub use normalize::{normalize_page, normalize_resource, resolve_reference, strip_fragment};
pub use reference::{is_css, parse_reference};
