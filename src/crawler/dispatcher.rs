//! Crawl dispatch over a URL batch
//!
//! Runs one politeness-checked fetch per URL under the bounded-concurrency
//! limiter and records one outcome per URL. A failure of any single URL
//! never aborts the batch.

use crate::crawler::limiter::run_bounded;
use crate::robots::RobotsChecker;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Status sentinel for a URL skipped by robots policy, distinct from any
/// real HTTP status code
pub const STATUS_ROBOTS_SKIP: u16 = 999;

/// Status sentinel for a transport-level failure (DNS, timeout, reset)
pub const STATUS_TRANSPORT_FAILURE: u16 = 0;

/// Outcome of one crawl attempt
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    /// The URL that was attempted
    pub url: String,
    /// Whether the attempt counts as successful
    pub ok: bool,
    /// HTTP status code, or a sentinel: [`STATUS_ROBOTS_SKIP`] when skipped
    /// by policy, [`STATUS_TRANSPORT_FAILURE`] on a transport failure
    pub status: u16,
}

impl CrawlResult {
    /// Result for a URL skipped by robots policy; no request was issued
    pub fn skipped(url: String) -> Self {
        Self {
            url,
            ok: true,
            status: STATUS_ROBOTS_SKIP,
        }
    }

    /// Result for a transport-level failure
    pub fn transport_failure(url: String) -> Self {
        Self {
            url,
            ok: false,
            status: STATUS_TRANSPORT_FAILURE,
        }
    }

    /// Result for a completed HTTP exchange
    pub fn from_status(url: String, status: u16, ok: bool) -> Self {
        Self { url, ok, status }
    }

    /// True when this result is the robots-skip sentinel
    pub fn is_robots_skip(&self) -> bool {
        self.status == STATUS_ROBOTS_SKIP
    }
}

/// Aggregated view of one crawl batch, for operator-facing logging
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// When the batch started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the batch
    pub elapsed: Duration,
    /// Fetches that completed with a 2xx status
    pub succeeded: usize,
    /// URLs skipped by robots policy
    pub skipped: usize,
    /// Fetches that failed (non-2xx or transport failure)
    pub failed: usize,
}

impl CrawlSummary {
    /// Builds a summary from a batch's results
    pub fn from_results(
        started_at: DateTime<Utc>,
        elapsed: Duration,
        results: &[CrawlResult],
    ) -> Self {
        let skipped = results.iter().filter(|r| r.is_robots_skip()).count();
        let succeeded = results
            .iter()
            .filter(|r| r.ok && !r.is_robots_skip())
            .count();
        let failed = results.iter().filter(|r| !r.ok).count();

        Self {
            started_at,
            elapsed,
            succeeded,
            skipped,
            failed,
        }
    }
}

/// Crawls URL batches under a global concurrency cap
///
/// Each URL is checked against its origin's robots.txt before any page
/// request is issued; disallowed URLs are recorded with the skip sentinel.
#[derive(Debug, Clone)]
pub struct CrawlDispatcher {
    client: Client,
    robots: RobotsChecker,
    agent: String,
    concurrency: usize,
}

impl CrawlDispatcher {
    /// Creates a dispatcher
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client carrying the identifying user agent header
    /// * `agent` - Agent identity for robots.txt matching (the crawler
    ///   name, not the full header value)
    /// * `concurrency` - Maximum number of in-flight fetches
    pub fn new(client: Client, agent: String, concurrency: usize) -> Self {
        let robots = RobotsChecker::new(client.clone());
        Self {
            client,
            robots,
            agent,
            concurrency,
        }
    }

    /// Crawls a batch of URLs, producing exactly one result per input URL
    ///
    /// Result order is unspecified because tasks complete concurrently;
    /// callers must not assume input order.
    pub async fn crawl(&self, urls: Vec<String>) -> Vec<CrawlResult> {
        run_bounded(urls, self.concurrency, |url| {
            let client = self.client.clone();
            let robots = self.robots.clone();
            let agent = self.agent.clone();
            async move { crawl_one(client, robots, agent, url).await }
        })
        .await
    }
}

/// Fetches a single URL after a robots.txt check
///
/// Never fails: every failure mode is captured in the returned record.
async fn crawl_one(
    client: Client,
    robots: RobotsChecker,
    agent: String,
    url: String,
) -> CrawlResult {
    if !robots.is_allowed(&url, &agent).await {
        tracing::debug!("robots.txt disallows {}", url);
        return CrawlResult::skipped(url);
    }

    match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!("{} -> {}", url, status);
            CrawlResult::from_status(url, status.as_u16(), status.is_success())
        }
        Err(e) => {
            tracing::debug!("fetch failed for {}: {}", url, e);
            CrawlResult::transport_failure(url)
        }
    }
}
