//! Worker pool bounding how many pages are processed at once
//!
//! Crawl steps are cheap tokio tasks and may outnumber the pool many times
//! over. A step must hold a permit while it loads a page and merges its
//! word counts; steps without a permit wait in the semaphore's FIFO queue.
//! Permits are released before a step waits on its children, so a deep
//! task tree can never starve the pool.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A fixed number of work permits shared by every crawl step of a run
#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// Global concurrency limiting semaphore
    permits: Arc<Semaphore>,

    /// Total number of permits
    size: usize,
}

impl WorkerPool {
    /// Creates a pool with `size` permits
    ///
    /// A size of 0 is raised to 1 so the pool can always make progress.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Waits for a free permit
    ///
    /// Work may proceed until the returned permit is dropped.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("worker pool semaphore is never closed")
    }

    /// Total number of permits
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of permits currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
