use crate::page::{Page, PageSource};
use crate::{PageError, PageResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// Page source serving a fixed page graph from memory
///
/// URLs without an entry fail with [`PageError::NotFound`].
///
/// # Example
///
/// ```
/// use wordcrawl::page::InMemoryPageSource;
/// use wordcrawl::Page;
///
/// let source = InMemoryPageSource::new()
///     .with_page("http://a/", Page::from_parts(&[("x", 1)], &["http://b/"]))
///     .with_page("http://b/", Page::from_parts(&[("y", 2)], &[]));
/// assert_eq!(source.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageSource {
    pages: HashMap<String, Page>,
}

impl InMemoryPageSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the page served for `url`
    pub fn insert(&mut self, url: impl Into<String>, page: Page) {
        self.pages.insert(url.into(), page);
    }

    /// Builder form of [`InMemoryPageSource::insert`]
    pub fn with_page(mut self, url: impl Into<String>, page: Page) -> Self {
        self.insert(url, page);
        self
    }

    /// Number of pages held
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether no pages are held
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl PageSource for InMemoryPageSource {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PageError::NotFound {
                url: url.to_string(),
            })
    }
}
