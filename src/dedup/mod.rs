//! First-seen-wins duplicate gate.
//!
//! Every record passes through [`Deduplicator::try_accept`] in ingestion
//! order. A record is dropped when it is malformed or when either its
//! normalized content or normalized title hashes to a key already held by an
//! earlier record. Accepted records get their [`ItemId`] minted here, after
//! both hash keys have been claimed.

use std::collections::HashMap;

use thiserror::Error;

use crate::normalize::char_len;
use crate::record::{Metadata, RawRecord};
use crate::types::{ContentHash, ItemId};

/// Records with less content than this are rejected as malformed.
pub const MIN_CONTENT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Malformed record: {0}")]
    Malformed(MalformedReason),
    #[error("Duplicate {field} of item {existing}")]
    Duplicate { field: DuplicateField, existing: ItemId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("empty title")]
    EmptyTitle,
    #[error("empty content")]
    EmptyContent,
    #[error("content shorter than {MIN_CONTENT_CHARS} characters ({0})")]
    ContentTooShort(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Content,
    Title,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateField::Content => f.write_str("content"),
            DuplicateField::Title => f.write_str("title"),
        }
    }
}

/// A record that cleared the gate. Owns its text; extraction borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRecord {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    pub source: String,
    pub category: String,
    pub url: String,
    pub metadata: Metadata,
}

/// Transient hash → id maps. Grows monotonically, never persisted.
#[derive(Debug, Default)]
pub struct DedupIndex {
    content: HashMap<ContentHash, ItemId>,
    title: HashMap<ContentHash, ItemId>,
}

impl DedupIndex {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn owner_of_content(&self, hash: &ContentHash) -> Option<&ItemId> {
        self.content.get(hash)
    }

    pub fn owner_of_title(&self, hash: &ContentHash) -> Option<&ItemId> {
        self.title.get(hash)
    }
}

/// Single-owner gate. Check and insert happen under one `&mut self` borrow,
/// so wrap in a `Mutex` if it must be shared between threads.
#[derive(Debug, Default)]
pub struct Deduplicator {
    index: DedupIndex,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &DedupIndex {
        &self.index
    }

    pub fn try_accept(&mut self, record: RawRecord) -> Result<AcceptedRecord, Rejection> {
        let title = record.title.trim();
        let content = record.content.trim();

        validate(title, content)?;

        let content_hash = ContentHash::of(content);
        let title_hash = ContentHash::of(title);

        if let Some(existing) = self.index.content.get(&content_hash) {
            return Err(Rejection::Duplicate {
                field: DuplicateField::Content,
                existing: existing.clone(),
            });
        }
        if let Some(existing) = self.index.title.get(&title_hash) {
            return Err(Rejection::Duplicate {
                field: DuplicateField::Title,
                existing: existing.clone(),
            });
        }

        let id = ItemId::mint(title, content);

        // Both keys were just checked absent; claim them before extraction.
        self.index.content.insert(content_hash, id.clone());
        self.index.title.insert(title_hash, id.clone());

        let category = record.category_or_default().to_string();
        Ok(AcceptedRecord {
            id,
            title: title.to_string(),
            content: content.to_string(),
            source: record.source,
            category,
            url: record.url,
            metadata: record.metadata,
        })
    }
}

fn validate(title: &str, content: &str) -> Result<(), Rejection> {
    if title.is_empty() {
        return Err(Rejection::Malformed(MalformedReason::EmptyTitle));
    }
    if content.is_empty() {
        return Err(Rejection::Malformed(MalformedReason::EmptyContent));
    }
    let len = char_len(content);
    if len < MIN_CONTENT_CHARS {
        return Err(Rejection::Malformed(MalformedReason::ContentTooShort(len)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(word: &str) -> String {
        format!("{word} ").repeat(20)
    }

    #[test]
    fn rejects_malformed_before_hashing() {
        let mut gate = Deduplicator::new();
        let err = gate.try_accept(RawRecord::new("", body("x"), "s")).unwrap_err();
        assert_eq!(err, Rejection::Malformed(MalformedReason::EmptyTitle));

        let err = gate.try_accept(RawRecord::new("T", "   ", "s")).unwrap_err();
        assert_eq!(err, Rejection::Malformed(MalformedReason::EmptyContent));

        let err = gate.try_accept(RawRecord::new("T", "a".repeat(49), "s")).unwrap_err();
        assert_eq!(err, Rejection::Malformed(MalformedReason::ContentTooShort(49)));

        assert!(gate.index().is_empty());
    }

    #[test]
    fn first_seen_wins_on_normalized_content() {
        let mut gate = Deduplicator::new();
        let first = gate
            .try_accept(RawRecord::new("Cats", body("Purr"), "Wikipedia"))
            .unwrap();

        let second = gate.try_accept(RawRecord::new(
            "Felines",
            format!("  {}  ", body("PURR").replace(' ', "\n ")),
            "arXiv",
        ));
        assert_eq!(
            second.unwrap_err(),
            Rejection::Duplicate {
                field: DuplicateField::Content,
                existing: first.id.clone(),
            }
        );
        assert_eq!(gate.index().len(), 1);
    }

    #[test]
    fn duplicate_title_is_rejected() {
        let mut gate = Deduplicator::new();
        let first = gate.try_accept(RawRecord::new("Cats", body("one"), "a")).unwrap();
        let err = gate
            .try_accept(RawRecord::new("  CATS ", body("two"), "b"))
            .unwrap_err();
        assert_eq!(
            err,
            Rejection::Duplicate {
                field: DuplicateField::Title,
                existing: first.id,
            }
        );
    }

    #[test]
    fn accepted_record_is_trimmed_and_categorised() {
        let mut gate = Deduplicator::new();
        let rec = gate
            .try_accept(RawRecord::new("  Dogs ", format!("\n{}", body("bark")), "s"))
            .unwrap();
        assert_eq!(rec.title, "Dogs");
        assert!(!rec.content.starts_with('\n'));
        assert_eq!(rec.category, "General");
        assert_eq!(rec.id, ItemId::mint("Dogs", &rec.content));
    }

    #[test]
    fn index_records_owner_of_both_hashes() {
        let mut gate = Deduplicator::new();
        let rec = gate.try_accept(RawRecord::new("Owls", body("hoot"), "s")).unwrap();

        let index = gate.index();
        assert_eq!(index.owner_of_title(&ContentHash::of("OWLS")), Some(&rec.id));
        assert_eq!(index.owner_of_content(&ContentHash::of(&body("HOOT"))), Some(&rec.id));
        assert_eq!(index.owner_of_title(&ContentHash::of("Hawks")), None);
    }
}
