//! wordcrawl main entry point
//!
//! This is the command-line interface for the wordcrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wordcrawl::config::{load_config_with_hash, Config};
use wordcrawl::crawler::{crawl, CrawlSettings};
use wordcrawl::output::{write_report_to, CrawlReport};
use wordcrawl::page::HttpPageSource;
use wordcrawl::profiler::{ProfiledPageSource, Profiler};
use wordcrawl::SystemClock;

/// wordcrawl: a parallel word-frequency web crawler
///
/// wordcrawl follows links from a set of start pages up to a maximum depth
/// and before a deadline, counting the words on every page it visits, and
/// reports the most popular ones.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(version)]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordcrawl=info,warn"),
            1 => EnvFilter::new("wordcrawl=debug,info"),
            2 => EnvFilter::new("wordcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Reports go to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the configured crawl and writes the report and profile
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let kind = config.crawler_kind();
    tracing::info!(
        "Starting {} crawl: {} start pages, max depth {}, timeout {}s, parallelism {}",
        kind,
        config.start_pages.len(),
        config.max_depth,
        config.timeout_seconds,
        config.parallelism
    );

    let profiler = Arc::new(Profiler::new());
    let source = HttpPageSource::from_config(&config).context("Failed to build page source")?;
    let source = Arc::new(ProfiledPageSource::new(
        source,
        profiler.clone(),
        "HttpPageSource::parse",
    ));
    let settings = CrawlSettings::from_config(&config)?;

    let result = profiler
        .time(
            "crawl",
            crawl(kind, settings, source, Arc::new(SystemClock)),
        )
        .await?;

    tracing::info!(
        "Crawl completed: {} URLs visited, {} distinct words",
        result.urls_visited,
        result.word_counts.len()
    );

    let report = CrawlReport::new(&result, config.popular_word_count);
    write_report_to(&report, config.result_path()).context("Failed to write crawl report")?;
    profiler
        .write_data(config.profile_output_path())
        .context("Failed to write profile data")?;

    Ok(())
}
