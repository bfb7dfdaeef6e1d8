use crate::ConfigError;
use regex::Regex;

/// Compiles a pattern so it only matches an entire candidate string
///
/// # Arguments
///
/// * `pattern` - A regular expression, without anchors
///
/// # Returns
///
/// * `Ok(Regex)` - The pattern wrapped as `^(?:pattern)$`
/// * `Err(ConfigError)` - The pattern is not a valid regular expression
pub fn compile_full_match(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// An ordered list of full-string matchers
///
/// A candidate is matched when ANY pattern matches the whole candidate, not
/// a substring of it.
///
/// # Examples
///
/// ```
/// use wordcrawl::url::IgnorePatterns;
///
/// let patterns = IgnorePatterns::compile(&["https://example\\.com/private/.*"]).unwrap();
/// assert!(patterns.matches("https://example.com/private/a"));
/// assert!(!patterns.matches("https://example.com/public"));
/// // Substring hits do not count
/// assert!(!patterns.matches("xhttps://example.com/private/a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Creates an empty list that matches nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Compiles every pattern in order, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| compile_full_match(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the whole candidate
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    /// Number of patterns in the list
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
