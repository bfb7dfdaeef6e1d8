//! The recursive crawl step
//!
//! One step handles one URL. It decides whether the URL may be visited,
//! loads it through the page source, merges the page's word counts into
//! the run's frontier, then spawns one child step per outbound link and
//! waits for all of them before returning. A step that has returned
//! therefore has a fully finished subtree.

use crate::clock::{Clock, Deadline};
use crate::crawler::scheduler::WorkerPool;
use crate::page::PageSource;
use crate::state::CrawlFrontier;
use crate::url::IgnorePatterns;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Why a crawl step returned without visiting its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The step had no depth budget left
    DepthExhausted,
    /// The clock read later than the run deadline
    DeadlinePassed,
    /// The URL matched an ignore pattern
    Ignored,
    /// Another step already claimed the URL
    AlreadyVisited,
}

/// Everything a crawl step shares with every other step of the run
pub struct CrawlContext {
    pub frontier: Arc<CrawlFrontier>,
    pub source: Arc<dyn PageSource>,
    pub clock: Arc<dyn Clock>,
    pub deadline: Deadline,
    pub ignore_patterns: IgnorePatterns,
    pub pool: WorkerPool,
}

impl std::fmt::Debug for CrawlContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlContext")
            .field("frontier", &self.frontier)
            .field("clock", &self.clock)
            .field("deadline", &self.deadline)
            .field("ignore_patterns", &self.ignore_patterns)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl CrawlContext {
    /// Decides whether a step may visit `url`, claiming it if so
    ///
    /// Conditions are checked in a fixed order and the first one that
    /// applies wins. Only the last check has a side effect: a successful
    /// claim marks the URL visited for the rest of the run.
    pub fn admit(&self, url: &str, remaining_depth: u32) -> Result<(), SkipReason> {
        if remaining_depth == 0 {
            return Err(SkipReason::DepthExhausted);
        }
        if self.deadline.has_passed(self.clock.as_ref()) {
            return Err(SkipReason::DeadlinePassed);
        }
        if self.ignore_patterns.matches(url) {
            return Err(SkipReason::Ignored);
        }
        if !self.frontier.try_visit(url) {
            return Err(SkipReason::AlreadyVisited);
        }
        Ok(())
    }

    /// Loads a claimed URL and merges its word counts
    ///
    /// # Returns
    ///
    /// * `Some(links)` - The page's outbound links
    /// * `None` - The page could not be loaded
    async fn visit(&self, url: &str) -> Option<Vec<String>> {
        let _permit = self.pool.acquire().await;

        match self.source.parse(url).await {
            Ok(page) => {
                self.frontier.add_counts(&page.word_counts);
                tracing::debug!(
                    "Visited {} ({} distinct words, {} links, {} URLs claimed so far)",
                    url,
                    page.word_counts.len(),
                    page.links.len(),
                    self.frontier.visited_count()
                );
                Some(page.links)
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", url, e);
                None
            }
        }
    }
}

/// Crawls `url` and, recursively, every page it links to
///
/// The returned future completes only after every child step it spawned
/// has completed. A child that panics is logged and otherwise ignored.
pub fn crawl_step(
    ctx: Arc<CrawlContext>,
    url: String,
    remaining_depth: u32,
) -> BoxFuture<'static, ()> {
    async move {
        if let Err(reason) = ctx.admit(&url, remaining_depth) {
            tracing::trace!("Skipping {}: {:?}", url, reason);
            return;
        }

        let Some(links) = ctx.visit(&url).await else {
            return;
        };

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(crawl_step(Arc::clone(&ctx), link, remaining_depth - 1));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl step under {} did not finish: {}", url, e);
            }
        }
    }
    .boxed()
}
