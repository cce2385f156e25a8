//! Integration tests for sitemap resolution
//!
//! These tests use wiremock to serve sitemap fixtures and exercise the
//! full fetch-classify-extract cycle, including index recursion and
//! gzip-compressed documents.

use flate2::write::GzEncoder;
use flate2::Compression;
use mapstride::config::UserAgentConfig;
use mapstride::fetch::{build_http_client, DocumentFetcher};
use mapstride::sitemap::SitemapResolver;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn create_resolver(max_depth: u32) -> SitemapResolver {
    let client = build_http_client(&test_user_agent()).expect("Failed to build client");
    SitemapResolver::new(DocumentFetcher::new(client), max_depth)
}

fn gzip_bytes(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_urlset_resolves_in_document_order() {
    let mock_server = MockServer::start().await;

    let sitemap_xml = r#"<?xml version="1.0" encoding="UTF-8"?>
    <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
      <url><loc>https://example.com/first</loc></url>
      <url><loc>https://example.com/second</loc></url>
      <url><loc>https://example.com/third</loc></url>
    </urlset>"#;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .expect("Resolution failed");

    assert_eq!(
        urls,
        vec![
            "https://example.com/first",
            "https://example.com/second",
            "https://example.com/third",
        ]
    );
}

#[tokio::test]
async fn test_index_concatenates_children_depth_first() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let index_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <sitemap><loc>{base}/sitemap-1.xml</loc></sitemap>
          <sitemap><loc>{base}/sitemap-2.xml</loc></sitemap>
        </sitemapindex>"#
    );

    let child1 = r#"<urlset>
      <url><loc>https://example.com/a1</loc></url>
      <url><loc>https://example.com/a2</loc></url>
    </urlset>"#;

    let child2 = r#"<urlset>
      <url><loc>https://example.com/b1</loc></url>
      <url><loc>https://example.com/b2</loc></url>
      <url><loc>https://example.com/b3</loc></url>
    </urlset>"#;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(child1))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-2.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(child2))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/sitemap.xml", base))
        .await
        .expect("Resolution failed");

    // Each child's contribution is contiguous and in child-reference order.
    assert_eq!(
        urls,
        vec![
            "https://example.com/a1",
            "https://example.com/a2",
            "https://example.com/b1",
            "https://example.com/b2",
            "https://example.com/b3",
        ]
    );
}

#[tokio::test]
async fn test_gzip_sitemap_matches_plain_equivalent() {
    let mock_server = MockServer::start().await;

    let sitemap_xml = r#"<?xml version="1.0" encoding="UTF-8"?>
    <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
      <url><loc>https://example.com/page1</loc></url>
      <url><loc>https://example.com/page2</loc></url>
    </urlset>"#;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(sitemap_xml)))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let plain = resolver
        .resolve(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .expect("Plain resolution failed");
    let compressed = resolver
        .resolve(&format!("{}/sitemap.xml.gz", mock_server.uri()))
        .await
        .expect("Gzip resolution failed");

    assert_eq!(plain, compressed);
    assert_eq!(plain.len(), 2);
}

#[tokio::test]
async fn test_gzip_index_child_is_decompressed() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let index_xml = format!(
        r#"<sitemapindex>
          <sitemap><loc>{base}/part-1.xml.gz</loc></sitemap>
        </sitemapindex>"#
    );

    let child = "<urlset><url><loc>https://example.com/zipped</loc></url></urlset>";

    Mock::given(method("GET"))
        .and(path("/index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/part-1.xml.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(child)))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/index.xml", base))
        .await
        .expect("Resolution failed");

    assert_eq!(urls, vec!["https://example.com/zipped"]);
}

#[tokio::test]
async fn test_self_referencing_index_terminates() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // The index references itself alongside a real child.
    let index_xml = format!(
        r#"<sitemapindex>
          <sitemap><loc>{base}/sitemap.xml</loc></sitemap>
          <sitemap><loc>{base}/real.xml</loc></sitemap>
        </sitemapindex>"#
    );

    let child = "<urlset><url><loc>https://example.com/page</loc></url></urlset>";

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/real.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(child))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/sitemap.xml", base))
        .await
        .expect("Resolution failed");

    // The cyclic branch contributes nothing; the real child survives.
    assert_eq!(urls, vec!["https://example.com/page"]);
}

#[tokio::test]
async fn test_depth_cap_cuts_deep_branches() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // A chain of indexes three levels deep, capped at depth 2.
    let level0 = format!(
        "<sitemapindex><sitemap><loc>{base}/level1.xml</loc></sitemap></sitemapindex>"
    );
    let level1 = format!(
        "<sitemapindex><sitemap><loc>{base}/level2.xml</loc></sitemap></sitemapindex>"
    );
    let level2 = format!(
        "<sitemapindex><sitemap><loc>{base}/level3.xml</loc></sitemap></sitemapindex>"
    );

    Mock::given(method("GET"))
        .and(path("/level0.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(level0))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(level1))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level2.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(level2))
        .mount(&mock_server)
        .await;

    // The branch past the cap must never be fetched.
    Mock::given(method("GET"))
        .and(path("/level3.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset></urlset>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(2);
    let urls = resolver
        .resolve(&format!("{}/level0.xml", base))
        .await
        .expect("Resolution failed");

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_child_fetch_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let index_xml = format!(
        r#"<sitemapindex>
          <sitemap><loc>{base}/missing.xml</loc></sitemap>
        </sitemapindex>"#
    );

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let result = resolver.resolve(&format!("{}/sitemap.xml", base)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_top_level_fetch_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let result = resolver
        .resolve(&format!("{}/sitemap.xml", mock_server.uri()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_root_degrades_to_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss><channel/></rss>"))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .expect("Resolution should degrade, not fail");

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_duplicates_across_children_preserved() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let index_xml = format!(
        r#"<sitemapindex>
          <sitemap><loc>{base}/part-1.xml</loc></sitemap>
          <sitemap><loc>{base}/part-2.xml</loc></sitemap>
        </sitemapindex>"#
    );

    let part = "<urlset><url><loc>https://example.com/shared</loc></url></urlset>";

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_xml))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/part-1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(part))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/part-2.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(part))
        .mount(&mock_server)
        .await;

    let resolver = create_resolver(10);
    let urls = resolver
        .resolve(&format!("{}/sitemap.xml", base))
        .await
        .expect("Resolution failed");

    assert_eq!(
        urls,
        vec!["https://example.com/shared", "https://example.com/shared"]
    );
}
