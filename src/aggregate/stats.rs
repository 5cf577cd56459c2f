use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::ranked::RankedCounts;
use crate::types::ProcessedItem;

pub const TOP_CATEGORY_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub avg_confidence: f64,
    pub total_confidence: f64,
    pub sources: Vec<String>,
    pub top_keywords: RankedCounts,
}

/// Per-category statistics over the final accepted set.
pub fn category_stats(items: &[ProcessedItem]) -> BTreeMap<String, CategoryStats> {
    struct Acc<'a> {
        count: usize,
        total_confidence: f64,
        sources: BTreeSet<&'a str>,
        keywords: Vec<&'a str>,
    }

    let mut accs: BTreeMap<&str, Acc> = BTreeMap::new();
    for item in items {
        let acc = accs.entry(item.category.as_str()).or_insert_with(|| Acc {
            count: 0,
            total_confidence: 0.0,
            sources: BTreeSet::new(),
            keywords: Vec::new(),
        });
        acc.count += 1;
        acc.total_confidence += item.confidence;
        acc.sources.insert(item.source.as_str());
        acc.keywords.extend(item.keywords.iter().map(String::as_str));
    }

    accs.into_iter()
        .map(|(category, acc)| {
            let stats = CategoryStats {
                count: acc.count,
                avg_confidence: acc.total_confidence / acc.count as f64,
                total_confidence: acc.total_confidence,
                sources: acc.sources.into_iter().map(str::to_string).collect(),
                top_keywords: RankedCounts::from_occurrences(acc.keywords, TOP_CATEGORY_KEYWORDS),
            };
            (category.to_string(), stats)
        })
        .collect()
}
