//! Configuration module for Broken-Links
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so a crawl can run with
//! no file at all.
//!
//! # Example
//!
//! ```no_run
//! use broken_links::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("broken-links.toml")).unwrap();
//! println!("Crawler will run {} visits at once", config.crawler.parallelism);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, LoginConfig, UserAgentConfig, DEFAULT_USER_AGENT};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{discard_invalid_login, validate, validate_login_config};
