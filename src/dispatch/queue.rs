//! External message-queue collaborator client
//!
//! Forwards batches of raw URL strings to the collaborator's batch-send
//! endpoint. The collaborator guarantees nothing about crawl outcome here;
//! crawling happens later, when it delivers batches back into
//! [`crate::crawler::CrawlDispatcher`].

use crate::{MapstrideError, Result};
use reqwest::Client;
use serde::Serialize;

/// JSON body of one batch-send request
#[derive(Debug, Serialize)]
struct BatchPayload<'a> {
    urls: &'a [String],
}

/// Client for the external queue service
#[derive(Debug, Clone)]
pub struct QueueClient {
    client: Client,
    endpoint: String,
}

impl QueueClient {
    /// Creates a client for the given batch-send endpoint
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// The configured batch-send endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one batch of URLs to the collaborator
    ///
    /// A transport failure or a non-2xx response is an error; the caller
    /// decides whether to continue with further batches.
    pub async fn send_batch(&self, urls: &[String]) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&BatchPayload { urls })
            .send()
            .await
            .map_err(|e| MapstrideError::Http {
                url: self.endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapstrideError::Queue {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        tracing::debug!("forwarded {} URLs to {}", urls.len(), self.endpoint);
        Ok(())
    }
}
