use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::{char_len, char_prefix};

pub const MAX_SUMMARY_CHARS: usize = 500;
const ELLIPSIS: &str = "...";

fn sentence_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]+").expect("static sentence pattern"))
}

/// Extractive summary: opening two sentences, the middle one, and the
/// second-to-last one.
///
/// Content with three or fewer sentence pieces is returned as its first
/// 500 characters.
pub fn summarize(content: &str) -> String {
    let sentences: Vec<&str> = sentence_boundary().split(content).collect();
    let count = sentences.len();

    if count <= 3 {
        return char_prefix(content, MAX_SUMMARY_CHARS).to_string();
    }

    let mut picks = vec![0, 1];
    if count > 4 {
        picks.push(count / 2);
    }
    picks.push(count - 2);

    let summary = picks
        .into_iter()
        .map(|i| sentences[i].trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    if char_len(&summary) > MAX_SUMMARY_CHARS {
        format!("{}{ELLIPSIS}", char_prefix(&summary, MAX_SUMMARY_CHARS))
    } else {
        summary
    }
}
