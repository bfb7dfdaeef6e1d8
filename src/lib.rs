//! wordcrawl: a parallel word-frequency web crawler
//!
//! This crate crawls a page graph from a set of seed URLs, counts word
//! occurrences on every page it visits, and aggregates the counts across the
//! whole run, bounded by a maximum link depth and a wall-clock deadline.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod page;
pub mod profiler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for wordcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors reported by a page source for a single URL
///
/// These never abort a crawl; the branch rooted at the failing URL simply
/// stops.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to read {url}: {source}")]
    Io { url: String, source: std::io::Error },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("No page for {url}")]
    NotFound { url: String },
}

/// Result type alias for wordcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page source operations
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use crawler::{run_crawl, CrawlResult, CrawlSettings, CrawlerKind};
pub use page::{Page, PageSource};
pub use state::CrawlFrontier;
pub use url::IgnorePatterns;
