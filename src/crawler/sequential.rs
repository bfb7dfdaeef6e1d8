//! Single-task crawler
//!
//! Visits pages one at a time, depth first, with the same skip rules as
//! the parallel crawler. Useful as a baseline and for sources that must
//! not be called concurrently.

use crate::clock::{Clock, Deadline};
use crate::crawler::settings::{CrawlResult, CrawlSettings};
use crate::page::PageSource;
use crate::url::IgnorePatterns;
use crate::CrawlError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Crawler that never has more than one page in flight
pub struct SequentialCrawler {
    settings: CrawlSettings,
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
}

/// Mutable state of one sequential run
struct Walk<'a> {
    source: &'a dyn PageSource,
    clock: &'a dyn Clock,
    deadline: Deadline,
    ignore_patterns: &'a IgnorePatterns,
    visited: HashSet<String>,
    counts: HashMap<String, u64>,
}

impl SequentialCrawler {
    /// Creates a sequential crawler, validating its settings
    pub fn new(
        settings: CrawlSettings,
        source: Arc<dyn PageSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlError> {
        settings.validate()?;
        Ok(Self {
            settings,
            source,
            clock,
        })
    }

    /// Runs the crawl to completion
    pub async fn run(&self) -> CrawlResult {
        let mut walk = Walk {
            source: self.source.as_ref(),
            clock: self.clock.as_ref(),
            deadline: Deadline::after(self.clock.as_ref(), self.settings.timeout),
            ignore_patterns: &self.settings.ignore_patterns,
            visited: HashSet::new(),
            counts: HashMap::new(),
        };

        tracing::info!(
            "Starting sequential crawl of {} seed URLs (max depth {})",
            self.settings.seed_urls.len(),
            self.settings.max_depth
        );

        for seed in &self.settings.seed_urls {
            walk.visit(seed.clone(), self.settings.max_depth).await;
        }

        tracing::info!("Crawl completed: {} URLs visited", walk.visited.len());

        CrawlResult {
            urls_visited: walk.visited.len(),
            word_counts: walk.counts,
        }
    }
}

impl<'a> Walk<'a> {
    /// Crawls `seed` and everything reachable from it, depth first
    ///
    /// Pending work lives on an explicit stack rather than the call stack,
    /// so arbitrarily long link chains are fine. Links are pushed in
    /// reverse so they are visited in document order.
    async fn visit(&mut self, seed: String, max_depth: u32) {
        let mut pending = vec![(seed, max_depth)];

        while let Some((url, remaining_depth)) = pending.pop() {
            if remaining_depth == 0
                || self.deadline.has_passed(self.clock)
                || self.ignore_patterns.matches(&url)
                || !self.visited.insert(url.clone())
            {
                continue;
            }

            let page = match self.source.parse(&url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", url, e);
                    continue;
                }
            };

            for (word, count) in page.word_counts {
                *self.counts.entry(word).or_insert(0) += count;
            }
            tracing::debug!("Visited {}", url);

            pending.extend(
                page.links
                    .into_iter()
                    .rev()
                    .map(|link| (link, remaining_depth - 1)),
            );
        }
    }
}
