//! HTTP document fetching
//!
//! This module handles all HTTP requests for sitemap resolution, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for sitemap and page content
//! - Transparent decompression of `.gz` sitemap files
//! - Error classification

use crate::config::UserAgentConfig;
use crate::{MapstrideError, Result};
use flate2::read::GzDecoder;
use reqwest::{redirect::Policy, Client};
use std::io::Read;
use std::time::Duration;
use url::Url;

/// Formats the identifying user agent string for outgoing requests
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use mapstride::config::UserAgentConfig;
/// use mapstride::fetch::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "Mapstride".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches documents as text, decompressing `.gz` targets
///
/// Knows nothing about sitemap semantics; the resolver layers that on top.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Creates a fetcher around an already-configured HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and returns its body as text
    ///
    /// A non-2xx response is an error carrying the URL and status code. If
    /// the URL path ends in `.gz` (case-insensitive) the body is treated as
    /// gzip-compressed and decompressed before decoding; an empty body
    /// yields an empty string. One failure is one failure; there is no
    /// retry.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the document
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded document text
    /// * `Err(MapstrideError)` - Transport failure, non-2xx status, or a
    ///   decompression failure
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MapstrideError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapstrideError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if has_gzip_suffix(url) {
            let bytes = response.bytes().await.map_err(|e| MapstrideError::Http {
                url: url.to_string(),
                source: e,
            })?;

            if bytes.is_empty() {
                return Ok(String::new());
            }

            let mut decoder = GzDecoder::new(&bytes[..]);
            let mut text = String::new();
            decoder
                .read_to_string(&mut text)
                .map_err(|e| MapstrideError::Decompress {
                    url: url.to_string(),
                    source: e,
                })?;
            Ok(text)
        } else {
            response.text().await.map_err(|e| MapstrideError::Http {
                url: url.to_string(),
                source: e,
            })
        }
    }
}

/// Checks whether a URL's path component ends in `.gz`, case-insensitively
///
/// Query strings and fragments do not count; only the path decides.
fn has_gzip_suffix(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase().ends_with(".gz"),
        // Unparseable input falls back to a raw suffix check
        Err(_) => url.to_ascii_lowercase().ends_with(".gz"),
    }
}
