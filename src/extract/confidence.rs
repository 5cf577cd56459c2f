use crate::dedup::AcceptedRecord;
use crate::normalize::char_len;

pub const BASE_CONFIDENCE: f64 = 0.5;

/// Source substrings (matched case-insensitively) and their bonus.
/// Every matching entry applies.
pub const SOURCE_BONUSES: &[(&str, f64)] = &[
    ("wikipedia", 0.30),
    ("arxiv", 0.40),
    ("gutenberg", 0.20),
    ("government", 0.35),
];

/// Content length thresholds (characters) and their bonus.
pub const LENGTH_BONUSES: &[(usize, f64)] = &[(1000, 0.10), (5000, 0.10)];

pub const PAGEVIEWS_THRESHOLD: f64 = 1000.0;
pub const DOWNLOADS_THRESHOLD: f64 = 100.0;
pub const METADATA_BONUS: f64 = 0.05;

/// Components of a confidence score before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfidenceBreakdown {
    pub base: f64,
    pub source_bonus: f64,
    pub length_bonus: f64,
    pub metadata_bonus: f64,
}

impl ConfidenceBreakdown {
    pub fn raw(&self) -> f64 {
        self.base + self.source_bonus + self.length_bonus + self.metadata_bonus
    }
}

pub trait ConfidenceScorer: Send + Sync {
    fn breakdown(&self, record: &AcceptedRecord) -> ConfidenceBreakdown;

    fn score_value(&self, breakdown: &ConfidenceBreakdown) -> f64 {
        breakdown.raw().clamp(0.0, 1.0)
    }
}

/// v0: source reputation plus content-length and metadata signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceConfidenceScorer;

impl ConfidenceScorer for SourceConfidenceScorer {
    fn breakdown(&self, record: &AcceptedRecord) -> ConfidenceBreakdown {
        let source = record.source.to_lowercase();
        let source_bonus: f64 = SOURCE_BONUSES
            .iter()
            .filter(|(needle, _)| source.contains(needle))
            .map(|(_, bonus)| bonus)
            .sum();

        let len = char_len(&record.content);
        let length_bonus: f64 = LENGTH_BONUSES
            .iter()
            .filter(|(threshold, _)| len > *threshold)
            .map(|(_, bonus)| bonus)
            .sum();

        let meta = &record.metadata;
        let mut metadata_bonus = 0.0;
        if meta.pageviews_or_default() > PAGEVIEWS_THRESHOLD {
            metadata_bonus += METADATA_BONUS;
        }
        if meta.downloads_or_default() > DOWNLOADS_THRESHOLD {
            metadata_bonus += METADATA_BONUS;
        }
        if meta.author_count() > 0 {
            metadata_bonus += METADATA_BONUS;
        }

        ConfidenceBreakdown {
            base: BASE_CONFIDENCE,
            source_bonus,
            length_bonus,
            metadata_bonus,
        }
    }
}
