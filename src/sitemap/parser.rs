//! Sitemap document classification and `loc` extraction
//!
//! Per the sitemaps.org protocol, a document is either a `urlset` (root
//! element containing `url` entries) or a `sitemapindex` (root element
//! containing `sitemap` entries), each entry carrying a `loc` child with an
//! absolute URL. Extraction preserves document order and keeps duplicates.

use quick_xml::events::Event;
use quick_xml::Reader;

/// How many leading characters of a document are scanned for a root marker
/// before falling back to a full parse.
const CLASSIFY_PREFIX_LEN: usize = 512;

/// The two kinds of sitemap document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A plain url set listing page URLs
    UrlSet,
    /// An index listing other sitemaps
    Index,
}

/// Classifies a sitemap document by its root element
///
/// Inspection order:
/// 1. scan a short prefix for the `<sitemapindex` marker;
/// 2. otherwise scan for the `<urlset` marker;
/// 3. otherwise parse and inspect the actual root element name;
/// 4. otherwise default to the url-set interpretation.
///
/// An unknown or malformed root never fails classification; it degrades to
/// [`DocumentKind::UrlSet`], whose extraction yields an empty list when no
/// matching structure exists.
pub fn classify(text: &str) -> DocumentKind {
    let mut cut = text.len().min(CLASSIFY_PREFIX_LEN);
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let prefix = &text[..cut];

    if prefix.contains("<sitemapindex") {
        return DocumentKind::Index;
    }
    if prefix.contains("<urlset") {
        return DocumentKind::UrlSet;
    }

    match root_element(text).as_deref() {
        Some("sitemapindex") => DocumentKind::Index,
        _ => DocumentKind::UrlSet,
    }
}

/// Returns the local name of the document's root element, if any
fn root_element(text: &str) -> Option<String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Extracts every page URL from a url-set document, in document order
///
/// Entries without a `loc` value are dropped; duplicates are preserved. A
/// single-entry document and a multi-entry document are handled uniformly.
pub fn extract_urls(text: &str) -> Vec<String> {
    extract_locs(text, "url")
}

/// Extracts every child sitemap URL from an index document, in document order
pub fn extract_child_sitemaps(text: &str) -> Vec<String> {
    extract_locs(text, "sitemap")
}

/// Collects the `loc` text of every `entry_element` in the document
///
/// A mid-stream XML error stops extraction and keeps what was collected so
/// far; a malformed document degrades to a shorter (possibly empty) list
/// instead of failing the caller.
fn extract_locs(text: &str, entry_element: &str) -> Vec<String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut buf = Vec::new();

    let mut in_entry = false;
    let mut in_loc = false;
    let mut current_loc: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == entry_element {
                    in_entry = true;
                    current_loc = None;
                } else if name == "loc" && in_entry {
                    in_loc = true;
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == entry_element && in_entry {
                    if let Some(loc) = current_loc.take() {
                        if !loc.is_empty() {
                            locs.push(loc);
                        }
                    }
                    in_entry = false;
                }
                if name == "loc" {
                    in_loc = false;
                }
            }
            Ok(Event::Text(e)) => {
                if in_loc {
                    match e.unescape() {
                        Ok(value) => current_loc = Some(value.trim().to_string()),
                        Err(e) => {
                            tracing::warn!("stopping sitemap extraction on unescape error: {}", e);
                            break;
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_loc {
                    let value = e.into_inner();
                    let value = String::from_utf8_lossy(&value);
                    current_loc = Some(value.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!("stopping sitemap extraction on XML error: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    locs
}
