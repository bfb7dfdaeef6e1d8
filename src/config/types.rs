use crate::crawler::CrawlerKind;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for wordcrawl
///
/// Every field is optional in the JSON document; missing fields take the
/// defaults documented on each field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Seed URLs the crawl starts from
    #[serde(default)]
    pub start_pages: Vec<String>,

    /// Regular expressions for URLs that must never be visited
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions for words that must not be counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Maximum number of pages processed at once (defaults to the CPU count)
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Forces a crawler implementation; empty or absent means parallel
    #[serde(default, deserialize_with = "deserialize_kind")]
    pub implementation_override: Option<CrawlerKind>,

    /// Maximum number of links followed from a seed, seed included
    #[serde(default)]
    pub max_depth: u32,

    /// Seconds after start when no new pages are visited
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Number of most frequent words kept in the report
    #[serde(default)]
    pub popular_word_count: usize,

    /// Where profiling data is appended; empty means stdout
    #[serde(default)]
    pub profile_output_path: String,

    /// Where the JSON report is written; empty means stdout
    #[serde(default)]
    pub result_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_timeout_seconds() -> u64 {
    1
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<Option<CrawlerKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl Config {
    /// The crawl timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The crawler implementation to run
    pub fn crawler_kind(&self) -> CrawlerKind {
        self.implementation_override.unwrap_or_default()
    }

    /// The User-Agent header to send, falling back to the crate name and version
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| format!("wordcrawl/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Output file for the JSON report, if any
    pub fn result_path(&self) -> Option<&Path> {
        non_empty_path(&self.result_path)
    }

    /// Output file for profiling data, if any
    pub fn profile_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.profile_output_path)
    }
}

fn non_empty_path(raw: &str) -> Option<&Path> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(Path::new(raw))
    }
}
