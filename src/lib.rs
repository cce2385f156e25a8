//! Mapstride: sitemap-driven URL discovery and crawl dispatch
//!
//! This crate resolves a sitemap reference (a plain `urlset` or a recursive
//! `sitemapindex`, optionally gzip-compressed) into a flat list of URLs and
//! dispatches them for crawling under a global concurrency cap and a
//! robots.txt politeness check.

pub mod config;
pub mod crawler;
pub mod dispatch;
pub mod fetch;
pub mod robots;
pub mod sitemap;

use thiserror::Error;

/// Main error type for Mapstride operations
#[derive(Debug, Error)]
pub enum MapstrideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decompress {url}: {source}")]
    Decompress { url: String, source: std::io::Error },

    #[error("Queue endpoint {endpoint} rejected batch with status {status}")]
    Queue { endpoint: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Mapstride operations
pub type Result<T> = std::result::Result<T, MapstrideError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlDispatcher, CrawlResult, CrawlSummary};
pub use dispatch::DispatchSink;
pub use sitemap::SitemapResolver;
