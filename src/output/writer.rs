use crate::crawler::CrawlResult;
use crate::output::word_counts::{popular_words, PopularWords};
use crate::CrawlError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The JSON document produced at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    /// The most popular words, in rank order
    pub word_counts: PopularWords,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

impl CrawlReport {
    /// Builds a report keeping the `popular_word_count` most frequent words
    pub fn new(result: &CrawlResult, popular_word_count: usize) -> Self {
        Self {
            word_counts: popular_words(&result.word_counts, popular_word_count),
            urls_visited: result.urls_visited,
        }
    }
}

/// Writes a report as pretty-printed JSON followed by a newline
pub fn write_report<W: Write>(report: &CrawlReport, mut writer: W) -> Result<(), CrawlError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a report to a file, replacing its contents, or to stdout when no
/// path is given
pub fn write_report_to(report: &CrawlReport, path: Option<&Path>) -> Result<(), CrawlError> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_report(report, BufWriter::new(file))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report(report, stdout.lock())?;
        }
    }
    Ok(())
}
