//! Configuration module for HN-Sweep
//!
//! This module handles loading, parsing, and validating the optional TOML configuration
//! file. Command-line flags are merged on top by the binary, and the merged result is
//! validated once with [`validate`].
//!
//! # Example
//!
//! ```no_run
//! use hn_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Sweeping {} pages with {} workers", config.scrape.pages, config.scrape.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ListingLayout, OutputConfig, ScrapeConfig, SiteConfig, DEFAULT_BASE_URL,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_PAGES, MAX_WORKERS};
