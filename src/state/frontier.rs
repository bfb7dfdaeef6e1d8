use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Shared state of a single crawl run
///
/// Holds the set of URLs already claimed by a crawl step and the running
/// word totals across every visited page. Both are safe to mutate from any
/// number of concurrent tasks; each operation locks a single shard for the
/// duration of one insert or one counter update.
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    /// URLs claimed by a crawl step, write-once per URL
    visited: DashSet<String>,

    /// Cumulative word counts over every visited page
    counts: DashMap<String, u64>,
}

/// Final contents of a frontier, taken after the task tree has joined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierSnapshot {
    /// Number of distinct URLs visited
    pub urls_visited: usize,

    /// Word totals across all visited pages
    pub word_counts: HashMap<String, u64>,
}

impl CrawlFrontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for visiting
    ///
    /// The membership test and the insertion happen as one operation, so
    /// when several tasks race on the same URL exactly one of them gets
    /// `true`.
    ///
    /// # Returns
    ///
    /// * `true` - The caller is the first to claim `url` and must visit it
    /// * `false` - Another step already claimed `url`
    pub fn try_visit(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Returns whether a URL has already been claimed
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Folds one page's word counts into the run totals
    ///
    /// Each word is updated with a single read-modify-write under its
    /// shard lock, so concurrent merges never lose an update.
    pub fn add_counts(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Copies out the visited count and word totals
    ///
    /// Meant to be called once no writers remain; it is not a consistent
    /// cut against concurrent writers.
    pub fn export(&self) -> FrontierSnapshot {
        let word_counts = self
            .counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        FrontierSnapshot {
            urls_visited: self.visited.len(),
            word_counts,
        }
    }
}
