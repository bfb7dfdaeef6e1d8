//! Time sources for deadline checks
//!
//! Crawl steps never read the system clock directly. They go through a
//! [`Clock`] so that deadline expiry can be simulated in tests without
//! waiting.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
///
/// Starts at the instant it was created and advances by explicit calls to
/// [`ManualClock::advance`].
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Instant>,
}

impl ManualClock {
    /// Creates a manual clock frozen at the current system instant
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An absolute cutoff for starting new crawl steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    /// Computes a deadline `timeout` after the clock's current instant
    pub fn after(clock: &dyn Clock, timeout: Duration) -> Self {
        Self(clock.now() + timeout)
    }

    /// Returns true once the clock reads strictly later than the deadline
    pub fn has_passed(&self, clock: &dyn Clock) -> bool {
        clock.now() > self.0
    }

    /// The instant this deadline falls on
    pub fn instant(&self) -> Instant {
        self.0
    }
}
