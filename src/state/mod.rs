//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Resource`: the links and assets found at one URL
//! - `CrawlState`: every URL seen during a crawl, with its resource or a placeholder
//!
//! Per-URL lifecycle: unseen (absent) → claimed (placeholder) → resolved
//! (resource recorded), or claimed forever if the fetch is abandoned.

mod crawl_state;
mod resource;

pub use crawl_state::CrawlState;
pub use resource::Resource;
