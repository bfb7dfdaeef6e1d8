use crate::url::IgnorePatterns;
use std::collections::HashMap;

/// Strips a raw token down to a countable word
///
/// Every character other than an ASCII letter, digit, or underscore is
/// removed and the rest is lowercased.
///
/// # Examples
///
/// ```
/// use wordcrawl::page::clean_word;
///
/// assert_eq!(clean_word("Hello,"), "hello");
/// assert_eq!(clean_word("don't"), "dont");
/// assert_eq!(clean_word("--"), "");
/// ```
pub fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Counts the words in a block of text
///
/// Text is split on whitespace and each token is cleaned with
/// [`clean_word`]. Empty words and words fully matching an ignored pattern
/// are dropped.
///
/// # Arguments
///
/// * `text` - Visible page text
/// * `ignored_words` - Patterns for words that must not be counted
///
/// # Returns
///
/// A map from word to its number of occurrences in `text`
pub fn count_words(text: &str, ignored_words: &IgnorePatterns) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for token in text.split_whitespace() {
        let word = clean_word(token);
        if word.is_empty() || ignored_words.matches(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}
