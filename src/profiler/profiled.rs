use super::Profiler;
use crate::page::{Page, PageSource};
use crate::PageResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Page source decorator that times every `parse` call
#[derive(Debug)]
pub struct ProfiledPageSource<S> {
    inner: S,
    profiler: Arc<Profiler>,
    name: String,
}

impl<S: PageSource> ProfiledPageSource<S> {
    /// Wraps `inner`, recording its calls under `name`
    pub fn new(inner: S, profiler: Arc<Profiler>, name: impl Into<String>) -> Self {
        Self {
            inner,
            profiler,
            name: name.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: PageSource> PageSource for ProfiledPageSource<S> {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        self.profiler.time(&self.name, self.inner.parse(url)).await
    }
}
