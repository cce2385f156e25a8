//! Recursive sitemap resolution
//!
//! Resolves a sitemap URL into the flat list of page URLs it references,
//! following sitemap indexes depth-first so each child's contribution stays
//! contiguous and in document order.

use crate::fetch::DocumentFetcher;
use crate::sitemap::parser::{classify, extract_child_sitemaps, extract_urls, DocumentKind};
use crate::Result;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

/// Resolves sitemap references into ordered URL lists
///
/// One `resolve` call owns its traversal state: the set of sitemap URLs
/// already fetched and the current nesting depth. A sitemap that references
/// itself, directly or through other indexes, is treated as an empty branch
/// instead of recursing forever; the same applies to branches past
/// `max_depth`.
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    fetcher: DocumentFetcher,
    max_depth: u32,
}

impl SitemapResolver {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetcher used for the sitemap and every child sitemap
    /// * `max_depth` - Maximum index nesting depth before a branch is cut
    pub fn new(fetcher: DocumentFetcher, max_depth: u32) -> Self {
        Self { fetcher, max_depth }
    }

    /// Resolves a sitemap URL into the ordered list of page URLs
    ///
    /// A fetch failure anywhere in the traversal, including inside a child
    /// sitemap, fails the whole resolution. Extraction itself never fails;
    /// an unrecognized document degrades to an empty url set.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the sitemap or sitemap index
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Discovered URLs, depth-first document order,
    ///   duplicates preserved
    /// * `Err(MapstrideError)` - A sitemap document could not be fetched
    pub async fn resolve(&self, url: &str) -> Result<Vec<String>> {
        let mut visited = HashSet::new();
        self.resolve_inner(url.to_string(), &mut visited, 0).await
    }

    /// Recursive traversal step
    ///
    /// Boxed so the recursive future has a nameable type; traversal is
    /// sequential, which is what preserves depth-first discovery order.
    fn resolve_inner<'a>(
        &'a self,
        url: String,
        visited: &'a mut HashSet<String>,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(async move {
            if !visited.insert(url.clone()) {
                tracing::warn!("sitemap {} already visited, skipping cyclic branch", url);
                return Ok(Vec::new());
            }

            if depth > self.max_depth {
                tracing::warn!(
                    "sitemap {} exceeds max nesting depth {}, skipping branch",
                    url,
                    self.max_depth
                );
                return Ok(Vec::new());
            }

            tracing::debug!("fetching sitemap {} (depth {})", url, depth);
            let text = self.fetcher.fetch_text(&url).await?;

            match classify(&text) {
                DocumentKind::UrlSet => {
                    let urls = extract_urls(&text);
                    tracing::debug!("{}: {} URLs", url, urls.len());
                    Ok(urls)
                }
                DocumentKind::Index => {
                    let children = extract_child_sitemaps(&text);
                    tracing::debug!("{}: index with {} child sitemaps", url, children.len());

                    let mut all = Vec::new();
                    for child in children {
                        let urls = self.resolve_inner(child, visited, depth + 1).await?;
                        all.extend(urls);
                    }
                    Ok(all)
                }
            }
        })
    }
}
