use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Words ranked by frequency, most frequent first
///
/// Serializes as a JSON object whose keys keep the ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularWords(Vec<(String, u64)>);

impl PopularWords {
    /// The ranked `(word, count)` pairs
    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PopularWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Ranking order: higher count first, then longer word, then alphabetical
fn rank(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.len().cmp(&a.0.len()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Selects the `n` most popular words
///
/// Words are ordered by count (descending), ties broken by word length
/// (descending), then alphabetically.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use wordcrawl::output::popular_words;
///
/// let counts: HashMap<String, u64> = [("a", 2), ("bb", 2), ("ccc", 1)]
///     .into_iter()
///     .map(|(w, c)| (w.to_string(), c))
///     .collect();
///
/// let top = popular_words(&counts, 2);
/// assert_eq!(top.entries(), &[("bb".to_string(), 2), ("a".to_string(), 2)]);
/// ```
pub fn popular_words(counts: &HashMap<String, u64>, n: usize) -> PopularWords {
    let mut ranked: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();
    ranked.sort_by(rank);
    ranked.truncate(n);
    PopularWords(ranked)
}
