use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

pub const MAX_KEYWORDS: usize = 20;
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Function words never treated as keywords. Sorted for binary search.
pub static STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "an", "and", "are", "at", "be", "been", "being", "beneath",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he",
    "her", "him", "his", "i", "in", "into", "is", "it", "its", "may", "me", "might", "must", "my",
    "of", "on", "or", "our", "over", "she", "should", "that", "the", "their", "them", "these",
    "they", "this", "those", "to", "under", "up", "us", "was", "we", "were", "will", "with",
    "would", "you", "your",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9]{3,}").expect("static token pattern"))
}

/// Top keywords of `title + content`.
///
/// Tokens are maximal ASCII alphanumeric runs of at least three characters
/// taken from the lowercased text. Stopwords and words seen only once are
/// dropped. Ordered by frequency, ties by first occurrence.
pub fn extract_keywords(title: &str, content: &str) -> Vec<String> {
    let text = format!("{title} {content}").to_lowercase();

    // (token, count) in first-occurrence order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for m in token_pattern().find_iter(&text) {
        let token = m.as_str();
        if is_stopword(token) {
            continue;
        }
        match position.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                position.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .filter(|(_, freq)| *freq > 1)
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_are_sorted_and_unique() {
        assert!(STOPWORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn frequency_then_first_occurrence() {
        let kws = extract_keywords(
            "Quantum",
            "Quantum field theory. Field theory of quantum gravity. Gravity gravity.",
        );
        assert_eq!(kws, vec!["quantum", "gravity", "field", "theory"]);
    }

    #[test]
    fn singletons_and_stopwords_are_dropped() {
        let kws = extract_keywords("The", "the the the and and unique word word");
        assert_eq!(kws, vec!["word"]);
    }

    #[test]
    fn short_runs_and_punctuation_split_tokens() {
        // "ab" too short; "x-ray" splits into "ray" only.
        let kws = extract_keywords("", "ab ab x-ray x-ray caf\u{e9} caf\u{e9}");
        assert_eq!(kws, vec!["ray", "caf"]);
    }

    #[test]
    fn caps_at_twenty() {
        let content: String = (0..30).map(|i| format!("word{i:02} word{i:02} ")).collect();
        let kws = extract_keywords("", &content);
        assert_eq!(kws.len(), MAX_KEYWORDS);
        assert_eq!(kws[0], "word00");
    }

    #[test]
    fn all_stopwords_yields_empty() {
        assert!(extract_keywords("the", "and the and the with with").is_empty());
    }
}
