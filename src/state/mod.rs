//! State module for tracking crawl progress
//!
//! This module provides the state shared by every crawl step of a run.
//!
//! # Components
//!
//! - `CrawlFrontier`: the visited-URL set and the word-count accumulator
//! - `FrontierSnapshot`: the frontier's contents once the run has joined

mod frontier;

// Re-export main types
pub use frontier::{CrawlFrontier, FrontierSnapshot};
