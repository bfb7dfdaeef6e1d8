//! URL matching for wordcrawl
//!
//! URLs are opaque strings to the crawl engine; no normalization happens
//! here. This module only decides whether a URL is excluded by the
//! configured ignore patterns.

mod matcher;

pub use matcher::{compile_full_match, IgnorePatterns};
