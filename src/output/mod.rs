//! Output module for crawl reports
//!
//! This module handles:
//! - Ranking words by popularity
//! - Writing the JSON crawl report to a file or stdout

mod word_counts;
mod writer;

pub use word_counts::{popular_words, PopularWords};
pub use writer::{write_report, write_report_to, CrawlReport};
