use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{ItemRef, ProcessedItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickLookup {
    pub by_confidence: Vec<ItemRef>,
    pub by_category: BTreeMap<String, Vec<ItemRef>>,
    pub by_source: BTreeMap<String, Vec<ItemRef>>,
}

pub fn quick_lookup(items: &[ProcessedItem]) -> QuickLookup {
    let mut by_confidence: Vec<ItemRef> = items.iter().map(ItemRef::from).collect();
    // Stable: equal confidence keeps input order.
    by_confidence.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut by_category: BTreeMap<String, Vec<ItemRef>> = BTreeMap::new();
    let mut by_source: BTreeMap<String, Vec<ItemRef>> = BTreeMap::new();
    for item in items {
        by_category
            .entry(item.category.clone())
            .or_default()
            .push(ItemRef::from(item));
        by_source
            .entry(item.source.clone())
            .or_default()
            .push(ItemRef::from(item));
    }

    QuickLookup {
        by_confidence,
        by_category,
        by_source,
    }
}
