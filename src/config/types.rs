use serde::Deserialize;

/// Main configuration structure for Mapstride
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub sitemaps: Vec<SitemapSource>,
    /// Optional external queue; its presence selects the external dispatch sink
    #[serde(default)]
    pub queue: Option<QueueConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Maximum nesting depth when traversing sitemap indexes
    #[serde(rename = "max-sitemap-depth", default = "default_max_sitemap_depth")]
    pub max_sitemap_depth: u32,
}

fn default_max_sitemap_depth() -> u32 {
    10
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// A sitemap to resolve, either a plain url set or a sitemap index
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapSource {
    /// Absolute URL of the sitemap document
    pub url: String,
}

/// External message-queue collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Batch-send endpoint of the queue service
    pub endpoint: String,

    /// Maximum number of URLs forwarded per batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    1000
}
