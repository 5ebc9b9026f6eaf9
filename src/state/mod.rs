//! State module for per-page crawl results
//!
//! # Components
//!
//! - `Status`: the terminal classification of a visited page
//! - `Page`: one visited URL, its status, and its outbound links

mod page;
mod status;

// Re-export main types
pub use page::Page;
pub use status::{Status, StatusKind, MISSING_LOCATION, TOO_MANY_REDIRECTS, UNKNOWN_RESPONSE};
