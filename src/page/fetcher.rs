//! HTTP and file page fetcher
//!
//! This module loads page content for the crawler, including:
//! - Building HTTP clients with the configured user agent
//! - GET requests for `http://` and `https://` pages
//! - Reading `file://` pages from the local filesystem
//! - Error classification into [`PageError`]

use crate::config::Config;
use crate::page::parser::parse_html;
use crate::page::{Page, PageSource};
use crate::url::IgnorePatterns;
use crate::{CrawlError, PageError, PageResult};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wordcrawl::page::build_http_client;
///
/// let client = build_http_client("wordcrawl/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page source that fetches pages over HTTP or from local files
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    ignored_words: IgnorePatterns,
}

impl HttpPageSource {
    /// Creates a page source from an existing client
    pub fn new(client: Client, ignored_words: IgnorePatterns) -> Self {
        Self {
            client,
            ignored_words,
        }
    }

    /// Creates a page source using the config's user agent and ignored words
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.user_agent())?;
        let ignored_words = IgnorePatterns::compile(&config.ignored_words)?;
        Ok(Self::new(client, ignored_words))
    }

    /// Loads the raw body of a page
    ///
    /// # Returns
    ///
    /// * `Ok((Url, String))` - The URL the body was finally loaded from
    ///   (after redirects) and the body text
    /// * `Err(PageError)` - The page could not be loaded
    pub async fn fetch_body(&self, url: &Url) -> PageResult<(Url, String)> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => read_file(url).await.map(|body| (url.clone(), body)),
            other => Err(PageError::UnsupportedScheme {
                url: url.to_string(),
                scheme: other.to_string(),
            }),
        }
    }

    async fn fetch_http(&self, url: &Url) -> PageResult<(Url, String)> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| PageError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(PageError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| PageError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok((final_url, body))
    }
}

async fn read_file(url: &Url) -> PageResult<String> {
    let path = url.to_file_path().map_err(|_| PageError::Io {
        url: url.to_string(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "URL does not name a local file",
        ),
    })?;

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| PageError::Io {
            url: url.to_string(),
            source,
        })
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn parse(&self, url: &str) -> PageResult<Page> {
        let parsed = Url::parse(url).map_err(|source| PageError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let (final_url, body) = self.fetch_body(&parsed).await?;
        Ok(parse_html(&body, &final_url, &self.ignored_words))
    }
}
