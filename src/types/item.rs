use serde::{Deserialize, Serialize};

use super::identifiers::{ItemId, SimilarityFingerprint};
use crate::record::Metadata;

/// An accepted, enriched record. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedItem {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub source: String,
    pub category: String,
    pub confidence: f64,
    pub similarity_fingerprint: SimilarityFingerprint,
    pub metadata: Metadata,
}

/// `{id, title, confidence}` projection used by the lookup views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub title: String,
    pub confidence: f64,
}

impl From<&ProcessedItem> for ItemRef {
    fn from(item: &ProcessedItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            confidence: item.confidence,
        }
    }
}
