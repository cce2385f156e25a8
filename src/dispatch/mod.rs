//! Dispatch boundary for discovered URLs
//!
//! Discovered URLs either get crawled immediately (inline) or forwarded in
//! fixed-size batches to an external messaging collaborator that delivers
//! them back for crawling later. Which variant applies is decided once, at
//! composition time, from configuration; callers never branch per URL.

mod queue;

pub use queue::QueueClient;

use crate::config::Config;
use crate::crawler::{CrawlDispatcher, CrawlSummary};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::time::Instant;

/// Where a batch of discovered URLs goes
#[derive(Debug, Clone)]
pub enum DispatchSink {
    /// Crawl the batch right here, synchronously
    Inline(CrawlDispatcher),
    /// Forward the batch, chunked, to the external queue collaborator
    External {
        queue: QueueClient,
        batch_size: usize,
    },
}

impl DispatchSink {
    /// Selects the sink variant from configuration
    ///
    /// The external variant is used exactly when a `[queue]` section is
    /// configured; otherwise URLs are crawled inline with the configured
    /// agent identity and concurrency cap.
    pub fn from_config(config: &Config, client: Client) -> Self {
        match &config.queue {
            Some(queue_config) => {
                tracing::info!("dispatching via external queue at {}", queue_config.endpoint);
                DispatchSink::External {
                    queue: QueueClient::new(client, queue_config.endpoint.clone()),
                    batch_size: queue_config.batch_size,
                }
            }
            None => {
                tracing::info!("dispatching inline");
                DispatchSink::Inline(CrawlDispatcher::new(
                    client,
                    config.user_agent.crawler_name.clone(),
                    config.crawler.max_concurrent_fetches as usize,
                ))
            }
        }
    }

    /// Dispatches a batch of URLs, returning how many were submitted
    ///
    /// Inline: crawls the whole batch and returns the input count — the
    /// count *submitted*, not the count that succeeded; per-URL outcomes are
    /// logged as a summary. External: forwards the batch in chunks of
    /// `batch_size` and returns the total forwarded; a chunk that the
    /// collaborator rejects fails the call.
    pub async fn enqueue_many(&self, urls: Vec<String>) -> Result<usize> {
        match self {
            DispatchSink::Inline(dispatcher) => {
                let submitted = urls.len();
                let started_at = Utc::now();
                let start = Instant::now();

                let results = dispatcher.crawl(urls).await;

                let summary = CrawlSummary::from_results(started_at, start.elapsed(), &results);
                tracing::info!(
                    "crawl batch finished: {} succeeded, {} skipped by robots, {} failed in {:?}",
                    summary.succeeded,
                    summary.skipped,
                    summary.failed,
                    summary.elapsed
                );

                Ok(submitted)
            }
            DispatchSink::External { queue, batch_size } => {
                let chunk_size = (*batch_size).max(1);
                let mut forwarded = 0;

                for chunk in urls.chunks(chunk_size) {
                    queue.send_batch(chunk).await?;
                    forwarded += chunk.len();
                }

                tracing::info!("forwarded {} URLs to {}", forwarded, queue.endpoint());
                Ok(forwarded)
            }
        }
    }
}
