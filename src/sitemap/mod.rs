//! Sitemap resolution module
//!
//! This module turns a sitemap reference into a flat, ordered list of page
//! URLs:
//! - Classification of a document as a plain url set or a sitemap index
//! - Extraction of `loc` values in document order
//! - Recursive, depth-first traversal of sitemap indexes with a visited-set
//!   and depth guard

mod parser;
mod resolver;

pub use parser::{classify, extract_child_sitemaps, extract_urls, DocumentKind};
pub use resolver::SitemapResolver;
