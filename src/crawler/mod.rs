//! Crawler module for the word-count crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The recursive, depth-bounded crawl step
//! - The worker pool bounding concurrent page processing
//! - Overall crawl coordination and result assembly
//! - A sequential crawler with the same semantics

mod coordinator;
mod scheduler;
mod sequential;
mod settings;
mod task;

pub use coordinator::{run_crawl, Coordinator};
pub use scheduler::WorkerPool;
pub use sequential::SequentialCrawler;
pub use settings::{CrawlResult, CrawlSettings, CrawlerKind};
pub use task::{crawl_step, CrawlContext, SkipReason};

use crate::clock::Clock;
use crate::page::PageSource;
use crate::CrawlError;
use std::sync::Arc;

/// Runs a complete crawl with the chosen implementation
///
/// This is the main entry point for starting a crawl.
///
/// # Arguments
///
/// * `kind` - Parallel or sequential crawler
/// * `settings` - Seeds, limits and ignore patterns of the run
/// * `source` - Where pages are loaded from
/// * `clock` - Time source for the deadline
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed
/// * `Err(CrawlError)` - Settings are invalid; nothing was crawled
pub async fn crawl(
    kind: CrawlerKind,
    settings: CrawlSettings,
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
) -> Result<CrawlResult, CrawlError> {
    match kind {
        CrawlerKind::Parallel => run_crawl(settings, source, clock).await,
        CrawlerKind::Sequential => Ok(SequentialCrawler::new(settings, source, clock)?
            .run()
            .await),
    }
}
