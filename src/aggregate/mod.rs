//! Read-only views over the final accepted set. Runs once, after indexing.

pub mod lookup;
pub mod ranked;
pub mod report;
pub mod stats;

use std::collections::BTreeMap;

use crate::types::ProcessedItem;

pub use lookup::{quick_lookup, QuickLookup};
pub use ranked::RankedCounts;
pub use report::{IntegrationReport, IntegrationSummary, TOP_CORPUS_KEYWORDS};
pub use stats::{category_stats, CategoryStats, TOP_CATEGORY_KEYWORDS};

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub category_stats: BTreeMap<String, CategoryStats>,
    pub quick_lookup: QuickLookup,
}

pub fn aggregate(items: &[ProcessedItem]) -> Aggregates {
    Aggregates {
        category_stats: category_stats(items),
        quick_lookup: quick_lookup(items),
    }
}
