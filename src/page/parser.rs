//! HTML parser for extracting words and links
//!
//! This module handles parsing HTML content to extract:
//! - The visible text of the page body, tokenized into word counts
//! - Links to follow (from `<a href>` tags)

use crate::page::words::count_words;
use crate::page::Page;
use crate::url::IgnorePatterns;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text is never shown to a reader
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content into a page's word counts and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the content was loaded from, for resolving relative links
/// * `ignored_words` - Patterns for words that must not be counted
///
/// # Example
///
/// ```
/// use wordcrawl::page::parse_html;
/// use wordcrawl::url::IgnorePatterns;
/// use url::Url;
///
/// let html = r#"<html><body>Hello <a href="/page">hello</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &IgnorePatterns::none());
/// assert_eq!(page.word_counts["hello"], 2);
/// assert_eq!(page.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &IgnorePatterns) -> Page {
    let document = Html::parse_document(html);

    let text = body_text(&document);
    let word_counts = count_words(&text, ignored_words);
    let links = extract_links(&document, base_url);

    Page { word_counts, links }
}

/// Collects the visible text of the document body
///
/// Text nodes are joined with spaces so that adjacent block elements do
/// not run their words together.
fn body_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let mut text = String::new();
    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| NON_VISIBLE_ELEMENTS.contains(&parent.value().name()))
                .unwrap_or(false);
            if hidden {
                continue;
            }
            text.push_str(fragment);
            text.push(' ');
        }
    }
    text
}

/// Extracts all followable links from the HTML document, in document order
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - URLs that are not HTTP(S), or not `file:` when the page itself is a file
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        "file" if base_url.scheme() == "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
