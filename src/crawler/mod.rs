//! Crawler module for dispatching discovered URLs
//!
//! This module contains the crawl execution logic, including:
//! - A generic bounded-concurrency executor
//! - Per-URL crawling with a robots.txt politeness check
//! - Per-batch outcome records and summaries

mod dispatcher;
mod limiter;

pub use dispatcher::{
    CrawlDispatcher, CrawlResult, CrawlSummary, STATUS_ROBOTS_SKIP, STATUS_TRANSPORT_FAILURE,
};
pub use limiter::run_bounded;
