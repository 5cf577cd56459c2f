use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::normalize::{char_prefix, normalize};

/// Stable item identity: `sha256(title + ":" + content[..100])`, 16 hex chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub const HEX_LEN: usize = 16;
    const CONTENT_PREFIX_CHARS: usize = 100;

    pub fn mint(title: &str, content: &str) -> Self {
        let combined = format!("{}:{}", title, char_prefix(content, Self::CONTENT_PREFIX_CHARS));
        ItemId(sha256_hex_prefix(combined.as_bytes(), Self::HEX_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// 128-bit dedup key over normalized text. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u128);

impl ContentHash {
    pub fn of(text: &str) -> Self {
        ContentHash(xxhash_rust::xxh3::xxh3_128(normalize(text).as_bytes()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Coarse locality key over sorted keywords and the content head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityFingerprint(String);

impl SimilarityFingerprint {
    pub const HEX_LEN: usize = 32;
    const CONTENT_PREFIX_CHARS: usize = 200;

    pub fn compute(keywords: &[String], content: &str) -> Self {
        let mut sorted: Vec<&str> = keywords.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let combined = format!(
            "{}:{}",
            sorted.join(" "),
            char_prefix(content, Self::CONTENT_PREFIX_CHARS)
        );
        SimilarityFingerprint(sha256_hex_prefix(combined.as_bytes(), Self::HEX_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn sha256_hex_prefix(bytes: &[u8], len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(len);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_is_sixteen_hex_chars() {
        let id = ItemId::mint("Cats", "Cats are small domesticated carnivores.");
        assert_eq!(id.as_str().len(), ItemId::HEX_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn item_id_ignores_content_past_prefix() {
        let head = "x".repeat(100);
        let a = ItemId::mint("T", &format!("{head}tail one"));
        let b = ItemId::mint("T", &format!("{head}tail two"));
        assert_eq!(a, b);
    }

    #[test]
    fn content_hash_is_whitespace_and_case_insensitive() {
        assert_eq!(ContentHash::of("Hello   World"), ContentHash::of("hello world\n"));
        assert_ne!(ContentHash::of("hello world"), ContentHash::of("hello there"));
        assert_eq!(ContentHash::of("a").to_string().len(), 32);
    }

    #[test]
    fn fingerprint_is_keyword_order_independent() {
        let a = SimilarityFingerprint::compute(&["beta".into(), "alpha".into()], "body");
        let b = SimilarityFingerprint::compute(&["alpha".into(), "beta".into()], "body");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), SimilarityFingerprint::HEX_LEN);
    }
}
