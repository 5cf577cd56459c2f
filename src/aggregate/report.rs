use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ranked::RankedCounts;
use crate::types::ProcessedItem;

pub const TOP_CORPUS_KEYWORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationSummary {
    pub total_items: usize,
    pub categories: usize,
    pub sources: usize,
    pub average_confidence: f64,
    pub total_keywords: usize,
    pub integration_date: DateTime<Utc>, // informational only
}

/// Corpus-wide overview written next to the four core artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationReport {
    pub integration_summary: IntegrationSummary,
    pub category_distribution: RankedCounts,
    pub source_distribution: RankedCounts,
    pub top_keywords: RankedCounts,
    pub categories_list: Vec<String>,
    pub sources_list: Vec<String>,
}

impl IntegrationReport {
    pub fn build(items: &[ProcessedItem], generated_at: DateTime<Utc>) -> Self {
        let categories: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();
        let sources: BTreeSet<&str> = items.iter().map(|i| i.source.as_str()).collect();

        let average_confidence = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|i| i.confidence).sum::<f64>() / items.len() as f64
        };

        let all_keywords = items
            .iter()
            .flat_map(|i| i.keywords.iter().map(String::as_str));
        let distinct_keywords: BTreeSet<&str> = all_keywords.clone().collect();

        Self {
            integration_summary: IntegrationSummary {
                total_items: items.len(),
                categories: categories.len(),
                sources: sources.len(),
                average_confidence,
                total_keywords: distinct_keywords.len(),
                integration_date: generated_at,
            },
            category_distribution: RankedCounts::from_occurrences(
                items.iter().map(|i| i.category.as_str()),
                usize::MAX,
            ),
            source_distribution: RankedCounts::from_occurrences(
                items.iter().map(|i| i.source.as_str()),
                usize::MAX,
            ),
            top_keywords: RankedCounts::from_occurrences(all_keywords, TOP_CORPUS_KEYWORDS),
            categories_list: categories.into_iter().map(str::to_string).collect(),
            sources_list: sources.into_iter().map(str::to_string).collect(),
        }
    }
}
