//! Robots.txt fetching and verdicts
//!
//! Derives `origin/robots.txt` from a URL, fetches it, and answers whether
//! the URL's path is allowed for an agent. Every check re-fetches; there is
//! no per-origin cache, so a long-running process always sees current policy.

use crate::robots::parser::RobotsRuleSet;
use reqwest::Client;
use url::Url;

/// Answers robots.txt queries for arbitrary URLs
#[derive(Debug, Clone)]
pub struct RobotsChecker {
    client: Client,
}

impl RobotsChecker {
    /// Creates a checker around an already-configured HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Checks whether `url` may be fetched by `agent`
    ///
    /// Permissive on every failure path: an unparseable URL, an unfetchable
    /// robots.txt, or a non-2xx response all yield `true`.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page to check
    /// * `agent` - Agent identity matched against `User-agent` blocks
    ///   (the crawler name, not the full user agent header)
    pub async fn is_allowed(&self, url: &str, agent: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return true;
        };

        let origin = parsed.origin().ascii_serialization();
        if origin == "null" {
            // Opaque origin (non-hierarchical URL); no policy to consult.
            return true;
        }
        let robots_url = format!("{}/robots.txt", origin);

        let body = match self.client.get(&robots_url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("failed to read {}: {}", robots_url, e);
                    return true;
                }
            },
            Ok(response) => {
                tracing::debug!("{} returned {}", robots_url, response.status());
                return true;
            }
            Err(e) => {
                tracing::debug!("failed to fetch {}: {}", robots_url, e);
                return true;
            }
        };

        let rules = RobotsRuleSet::parse(&body, agent);
        !rules.is_disallowed(parsed.path())
    }
}
