/// Canonical form used for dedup hashing.
///
/// Rules:
/// - Whitespace runs collapse to a single space
/// - Leading/trailing whitespace removed
/// - Lowercase
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.to_lowercase()
}

/// Longest prefix of `s` holding at most `max_chars` characters.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Character length (not byte length).
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
