//! Configuration module for Mapstride
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use mapstride::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use {} concurrent fetches", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, QueueConfig, SitemapSource, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
