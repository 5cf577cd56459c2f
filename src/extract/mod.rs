pub mod confidence;
pub mod keywords;
pub mod summary;

use crate::dedup::AcceptedRecord;
use crate::types::{ProcessedItem, SimilarityFingerprint};

pub use confidence::{ConfidenceBreakdown, ConfidenceScorer, SourceConfidenceScorer};
pub use keywords::{extract_keywords, is_stopword, MAX_KEYWORDS, MIN_KEYWORD_CHARS, STOPWORDS};
pub use summary::{summarize, MAX_SUMMARY_CHARS};

/// Turns an accepted record into a [`ProcessedItem`].
///
/// Stateless apart from the scorer, so one extractor can be shared across a
/// worker pool.
pub struct FeatureExtractor<S> {
    scorer: S,
}

impl Default for FeatureExtractor<SourceConfidenceScorer> {
    fn default() -> Self {
        Self {
            scorer: SourceConfidenceScorer,
        }
    }
}

impl<S> FeatureExtractor<S>
where
    S: ConfidenceScorer,
{
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn extract(&self, record: AcceptedRecord) -> ProcessedItem {
        let keywords = extract_keywords(&record.title, &record.content);
        let summary = summarize(&record.content);
        let confidence = self.scorer.score_value(&self.scorer.breakdown(&record));
        let similarity_fingerprint = SimilarityFingerprint::compute(&keywords, &record.content);

        ProcessedItem {
            id: record.id,
            title: record.title,
            content: record.content,
            summary,
            keywords,
            source: record.source,
            category: record.category,
            confidence,
            similarity_fingerprint,
            metadata: record.metadata,
        }
    }
}
