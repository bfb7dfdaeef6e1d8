//! Profiler module for wall-time accounting
//!
//! Accumulates how long named operations took across the whole run and
//! writes a plain-text summary at the end.

mod profiled;

pub use profiled::ProfiledPageSource;

use crate::CrawlError;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Shared wall-time accumulator
///
/// Safe to use from many tasks at once; durations recorded under the same
/// name are summed.
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Utc>,
    timings: DashMap<String, Duration>,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            timings: DashMap::new(),
        }
    }

    /// Adds `elapsed` to the total recorded under `name`
    pub fn record(&self, name: &str, elapsed: Duration) {
        *self.timings.entry(name.to_string()).or_default() += elapsed;
    }

    /// Awaits `future`, recording how long it took under `name`
    pub async fn time<F: Future>(&self, name: &str, future: F) -> F::Output {
        let start = Instant::now();
        let output = future.await;
        self.record(name, start.elapsed());
        output
    }

    /// Total time recorded under `name`, if anything was recorded
    pub fn total(&self, name: &str) -> Option<Duration> {
        self.timings.get(name).map(|entry| *entry.value())
    }

    /// Writes the summary to `writer`
    ///
    /// The first line is the run's start time, followed by one line per
    /// operation sorted by name.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let mut entries: Vec<(String, Duration)> = self
            .timings
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, elapsed) in entries {
            writeln!(writer, "{} took {}", name, format_duration(elapsed))?;
        }
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the summary to `path`, or prints it to stdout when no path
    /// is given
    pub fn write_data(&self, path: Option<&Path>) -> Result<(), CrawlError> {
        match path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                self.write_to(BufWriter::new(file))?;
                tracing::info!("Profile data appended to {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                self.write_to(stdout.lock())?;
            }
        }
        Ok(())
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats as `<minutes>m <seconds>s <millis>ms`
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}
