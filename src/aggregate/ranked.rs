use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Frequency table kept in rank order.
///
/// Serializes as a JSON object whose key order is the rank order, which a
/// `BTreeMap` would lose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCounts(Vec<(String, usize)>);

impl RankedCounts {
    /// Ranks by count descending; equal counts keep first-seen order.
    pub fn from_occurrences<'a, I>(occurrences: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut position: HashMap<&'a str, usize> = HashMap::new();

        for key in occurrences {
            match position.get(key) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    position.insert(key, counts.len());
                    counts.push((key.to_string(), 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        RankedCounts(counts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, n)| (k.as_str(), *n))
    }
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_first_seen() {
        let ranked = RankedCounts::from_occurrences(["b", "a", "c", "a", "c"], 10);
        let order: Vec<_> = ranked.iter().collect();
        assert_eq!(order, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn serializes_in_rank_order() {
        let ranked = RankedCounts::from_occurrences(["zeta", "alpha", "zeta"], 10);
        assert_eq!(serde_json::to_string(&ranked).unwrap(), r#"{"zeta":2,"alpha":1}"#);
    }

    #[test]
    fn respects_limit() {
        let ranked = RankedCounts::from_occurrences(["a", "b", "c"], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.get("c"), None);
    }
}
