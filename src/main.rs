//! Mapstride main entry point
//!
//! This is the command-line interface for the Mapstride sitemap crawler.

use clap::Parser;
use mapstride::config::load_config_with_hash;
use mapstride::dispatch::DispatchSink;
use mapstride::fetch::{build_http_client, DocumentFetcher};
use mapstride::sitemap::SitemapResolver;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mapstride: sitemap-driven URL discovery and crawl dispatch
///
/// Mapstride resolves the configured sitemaps (plain url sets or recursive
/// sitemap indexes, optionally gzip-compressed) into a flat URL list and
/// dispatches it: crawled inline under a concurrency cap and robots.txt
/// checks, or forwarded in batches to an external queue.
#[derive(Parser, Debug)]
#[command(name = "mapstride")]
#[command(version = "1.0.0")]
#[command(about = "A sitemap-driven crawl dispatcher", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resolve and print the discovered URLs without dispatching them
    #[arg(long)]
    preview: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.preview {
        handle_preview(&config).await?;
    } else {
        handle_dispatch(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mapstride=info,warn"),
            1 => EnvFilter::new("mapstride=debug,info"),
            2 => EnvFilter::new("mapstride=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --preview mode: resolves sitemaps and prints the URLs
async fn handle_preview(config: &mapstride::config::Config) -> anyhow::Result<()> {
    println!("=== Mapstride Preview ===\n");

    let client = build_http_client(&config.user_agent)?;
    let resolver = SitemapResolver::new(
        DocumentFetcher::new(client),
        config.crawler.max_sitemap_depth,
    );

    let mut total = 0;
    for source in &config.sitemaps {
        let urls = resolver.resolve(&source.url).await?;
        println!("{} ({} URLs):", source.url, urls.len());
        for url in &urls {
            println!("  {}", url);
        }
        println!();
        total += urls.len();
    }

    println!(
        "✓ {} URLs discovered across {} sitemaps",
        total,
        config.sitemaps.len()
    );

    Ok(())
}

/// Handles the default mode: resolves sitemaps and dispatches the URLs
async fn handle_dispatch(config: &mapstride::config::Config) -> anyhow::Result<()> {
    let client = build_http_client(&config.user_agent)?;
    let resolver = SitemapResolver::new(
        DocumentFetcher::new(client.clone()),
        config.crawler.max_sitemap_depth,
    );

    let mut discovered = Vec::new();
    for source in &config.sitemaps {
        let urls = resolver.resolve(&source.url).await?;
        tracing::info!("{}: {} URLs discovered", source.url, urls.len());
        discovered.extend(urls);
    }
    tracing::info!("{} URLs discovered in total", discovered.len());

    // Resolve the sink once, then hand over the whole batch.
    let sink = DispatchSink::from_config(config, client);
    let submitted = sink.enqueue_many(discovered).await?;

    tracing::info!("Submitted {} URLs for crawling", submitted);

    Ok(())
}
