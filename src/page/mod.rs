//! Page sources: turning a URL into word counts and outbound links
//!
//! The crawl engine only sees the [`PageSource`] trait. This module ships
//! two implementations:
//! - `HttpPageSource`: fetches `http(s)://` pages over the network and
//!   reads `file://` pages from disk, then parses the HTML
//! - `InMemoryPageSource`: serves a fixed page graph held in memory

mod fetcher;
mod memory;
mod parser;
mod words;

pub use fetcher::{build_http_client, HttpPageSource};
pub use memory::InMemoryPageSource;
pub use parser::{extract_links, parse_html};
pub use words::{clean_word, count_words};

use crate::PageResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// What a page source reports for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Occurrences of each word on this page only
    pub word_counts: HashMap<String, u64>,

    /// Outbound links in document order
    pub links: Vec<String>,
}

impl Page {
    /// Creates a page from word counts and links
    pub fn new(word_counts: HashMap<String, u64>, links: Vec<String>) -> Self {
        Self { word_counts, links }
    }

    /// Creates a page from borrowed `(word, count)` pairs and link strings
    ///
    /// # Example
    ///
    /// ```
    /// use wordcrawl::Page;
    ///
    /// let page = Page::from_parts(&[("x", 1)], &["http://b/", "http://c/"]);
    /// assert_eq!(page.word_counts["x"], 1);
    /// assert_eq!(page.links.len(), 2);
    /// ```
    pub fn from_parts(words: &[(&str, u64)], links: &[&str]) -> Self {
        Self {
            word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Produces the words and links of the page at a URL
///
/// Implementations may be slow (network bound) and may fail; a failure is
/// local to the URL and never aborts a crawl.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches and parses the page at `url`
    async fn parse(&self, url: &str) -> PageResult<Page>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        (**self).parse(url).await
    }
}
