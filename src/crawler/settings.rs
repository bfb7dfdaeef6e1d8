use crate::config::Config;
use crate::state::FrontierSnapshot;
use crate::url::IgnorePatterns;
use crate::ConfigError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which crawler implementation runs a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrawlerKind {
    /// One task per discovered URL, bounded by the worker pool
    #[default]
    Parallel,

    /// A single task visiting pages one at a time
    Sequential,
}

impl FromStr for CrawlerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parallel" => Ok(Self::Parallel),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!(
                "unknown crawler implementation '{}', expected 'parallel' or 'sequential'",
                other
            )),
        }
    }
}

impl fmt::Display for CrawlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parallel => write!(f, "parallel"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

/// Immutable inputs of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// URLs the crawl starts from
    pub seed_urls: Vec<String>,

    /// Depth budget given to every seed
    pub max_depth: u32,

    /// Time after start when no new pages are visited
    pub timeout: Duration,

    /// URLs matching any of these are never visited
    pub ignore_patterns: IgnorePatterns,

    /// Maximum number of pages processed at once
    pub parallelism: usize,
}

impl CrawlSettings {
    /// Creates settings for the given seeds with a depth of 0, a one second
    /// timeout, no ignore patterns and a parallelism of 1
    pub fn new<S: Into<String>>(seed_urls: impl IntoIterator<Item = S>) -> Self {
        Self {
            seed_urls: seed_urls.into_iter().map(Into::into).collect(),
            max_depth: 0,
            timeout: Duration::from_secs(1),
            ignore_patterns: IgnorePatterns::none(),
            parallelism: 1,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ignore_patterns(mut self, ignore_patterns: IgnorePatterns) -> Self {
        self.ignore_patterns = ignore_patterns;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Builds settings from a loaded configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSettings)` - Settings with compiled ignore patterns
    /// * `Err(ConfigError)` - A URL pattern does not compile, or the limits are invalid
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let settings = Self {
            seed_urls: config.start_pages.clone(),
            max_depth: config.max_depth,
            timeout: config.timeout(),
            ignore_patterns: IgnorePatterns::compile(&config.ignored_urls)?,
            parallelism: config.parallelism,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the limits a crawl cannot run without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if self.parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be at least 1, got {}",
                self.parallelism
            )));
        }

        Ok(())
    }
}

/// Outcome of a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// Word totals over every page visited
    pub word_counts: HashMap<String, u64>,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

impl From<FrontierSnapshot> for CrawlResult {
    fn from(snapshot: FrontierSnapshot) -> Self {
        Self {
            word_counts: snapshot.word_counts,
            urls_visited: snapshot.urls_visited,
        }
    }
}
