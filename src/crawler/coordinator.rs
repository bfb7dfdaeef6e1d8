//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a whole parallel crawl run:
//! - Computing the run deadline once from the configured timeout
//! - Creating the shared frontier state
//! - Launching one crawl step per seed URL across the worker pool
//! - Joining the complete task tree
//! - Exporting the final word counts and visited count

use crate::clock::{Clock, Deadline};
use crate::crawler::scheduler::WorkerPool;
use crate::crawler::settings::{CrawlResult, CrawlSettings};
use crate::crawler::task::{crawl_step, CrawlContext};
use crate::page::PageSource;
use crate::state::CrawlFrontier;
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlSettings,
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `settings` - Seeds, limits and ignore patterns of the run
    /// * `source` - Where pages are loaded from
    /// * `clock` - Time source for the deadline
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Settings are valid
    /// * `Err(CrawlError)` - Settings are invalid; nothing was crawled
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

    /// The settings this coordinator runs with
    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Runs the crawl to completion
    ///
    /// Returns once every seed step and, transitively, every step it
    /// spawned has finished. Steps that start after the deadline do
    /// nothing; pages already being loaded when it passes are still merged.
    pub async fn run(&self) -> CrawlResult {
        let deadline = Deadline::after(self.clock.as_ref(), self.settings.timeout);
        let frontier = Arc::new(CrawlFrontier::new());
        let started = Instant::now();

        let ctx = Arc::new(CrawlContext {
            frontier: Arc::clone(&frontier),
            source: Arc::clone(&self.source),
            clock: Arc::clone(&self.clock),
            deadline,
            ignore_patterns: self.settings.ignore_patterns.clone(),
            pool: WorkerPool::new(self.settings.parallelism),
        });

        tracing::info!(
            "Starting crawl of {} seed URLs (max depth {}, timeout {:?}, parallelism {})",
            self.settings.seed_urls.len(),
            self.settings.max_depth,
            self.settings.timeout,
            self.settings.parallelism
        );

        let mut roots = JoinSet::new();
        for seed in &self.settings.seed_urls {
            roots.spawn(crawl_step(
                Arc::clone(&ctx),
                seed.clone(),
                self.settings.max_depth,
            ));
        }

        while let Some(joined) = roots.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Seed crawl step did not finish: {}", e);
            }
        }

        let result = CrawlResult::from(frontier.export());

        tracing::info!(
            "Crawl completed: {} URLs visited, {} distinct words in {:?}",
            result.urls_visited,
            result.word_counts.len(),
            started.elapsed()
        );

        result
    }
}

/// Runs a parallel crawl
///
/// # Arguments
///
/// * `settings` - Seeds, limits and ignore patterns of the run
/// * `source` - Where pages are loaded from
/// * `clock` - Time source for the deadline
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Word totals and visited count
/// * `Err(CrawlError)` - Settings are invalid; nothing was crawled
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wordcrawl::page::InMemoryPageSource;
/// use wordcrawl::{run_crawl, CrawlSettings, Page, SystemClock};
///
/// # async fn example() -> wordcrawl::Result<()> {
/// let source = InMemoryPageSource::new()
///     .with_page("http://a/", Page::from_parts(&[("x", 1)], &["http://b/"]))
///     .with_page("http://b/", Page::from_parts(&[("x", 2)], &[]));
///
/// let settings = CrawlSettings::new(["http://a/"]).with_max_depth(2);
/// let result = run_crawl(settings, Arc::new(source), Arc::new(SystemClock)).await?;
/// assert_eq!(result.urls_visited, 2);
/// assert_eq!(result.word_counts["x"], 3);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    settings: CrawlSettings,
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
) -> Result<CrawlResult, CrawlError> {
    let coordinator = Coordinator::new(settings, source, clock)?;
    Ok(coordinator.run().await)
}
