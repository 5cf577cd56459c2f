//! One integration run: `Loading → Processing → Aggregating → Persisted`.
//!
//! Processing gates records in ingestion order, extracts features on a
//! worker pool, then indexes the extracted items back in ingestion order.
//! Each [`Pipeline`] call owns its own dedup and index state, so runs never
//! share anything.

pub mod cancel;
pub mod config;
pub mod error;
pub mod summary;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::aggregate::{aggregate, Aggregates, IntegrationReport};
use crate::dedup::{AcceptedRecord, Deduplicator, Rejection};
use crate::extract::{
    is_stopword, ConfidenceScorer, FeatureExtractor, SourceConfidenceScorer, MAX_KEYWORDS,
    MIN_KEYWORD_CHARS,
};
use crate::index::{IndexError, Indexer, KnowledgeIndexes};
use crate::record::RawRecord;
use crate::store::{load_inputs, ArtifactWriter, Artifacts, KnowledgeDatabase};
use crate::types::{ItemId, ProcessedItem};

pub use cancel::CancellationToken;
pub use config::PipelineConfig;
pub use error::{InvariantViolation, PipelineError};
pub use summary::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Processing,
    Aggregating,
    Persisted,
}

/// In-memory result of Processing + Aggregating.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Accepted items in ingestion order.
    pub items: Vec<ProcessedItem>,
    pub indexes: KnowledgeIndexes,
    pub aggregates: Aggregates,
    pub summary: RunSummary,
}

impl ProcessOutput {
    pub fn item(&self, id: &ItemId) -> Option<&ProcessedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Items carrying `keyword`, in ingestion order.
    pub fn items_for_keyword(&self, keyword: &str) -> Vec<&ProcessedItem> {
        let ids: HashSet<&ItemId> = self.indexes.items_for_keyword(keyword).into_iter().collect();
        self.items.iter().filter(|item| ids.contains(&item.id)).collect()
    }

    pub fn into_artifacts(self, generated_at: DateTime<Utc>) -> Artifacts {
        let report = IntegrationReport::build(&self.items, generated_at);
        Artifacts {
            database: KnowledgeDatabase::new(self.items, generated_at),
            indexes: self.indexes,
            category_stats: self.aggregates.category_stats,
            quick_lookup: self.aggregates.quick_lookup,
            report,
            summary: self.summary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub written: Vec<PathBuf>,
}

pub struct Pipeline<S = SourceConfidenceScorer> {
    config: PipelineConfig,
    extractor: FeatureExtractor<S>,
    cancel: CancellationToken,
}

impl Pipeline<SourceConfidenceScorer> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_scorer(config, SourceConfidenceScorer)
    }
}

impl Default for Pipeline<SourceConfidenceScorer> {
    fn default() -> Self {
        Self::new(PipelineConfig::v0())
    }
}

impl<S> Pipeline<S>
where
    S: ConfidenceScorer,
{
    pub fn with_scorer(config: PipelineConfig, scorer: S) -> Self {
        Self {
            config,
            extractor: FeatureExtractor::new(scorer),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full run: load inputs, process, aggregate, persist into `output_dir`.
    ///
    /// Unreadable inputs are recorded in the summary; everything else that
    /// fails aborts the run before anything is written.
    pub fn run(&self, inputs: &[PathBuf], output_dir: &Path) -> Result<RunOutcome, PipelineError> {
        tracing::info!(stage = ?Stage::Loading, inputs = inputs.len(), "Starting knowledge integration");
        let loaded = load_inputs(inputs);
        self.checkpoint(Stage::Loading)?;

        let mut output = self.process(loaded.records)?;
        // entries that never parsed as records were still seen and rejected
        output.summary.records_seen += loaded.malformed;
        output.summary.rejected_malformed += loaded.malformed;
        output.summary.files_loaded = loaded.loaded;
        output.summary.io_failures = loaded.failures;

        let artifacts = output.into_artifacts(Utc::now());
        let written = ArtifactWriter::new(output_dir).write(&artifacts)?;

        let summary = artifacts.summary;
        tracing::info!(
            stage = ?Stage::Persisted,
            accepted = summary.accepted,
            rejected_malformed = summary.rejected_malformed,
            rejected_duplicate = summary.rejected_duplicate,
            io_failures = summary.io_failures.len(),
            "Knowledge integration complete"
        );

        Ok(RunOutcome { summary, written })
    }

    /// Processing + Aggregating over records already in ingestion order.
    pub fn process<I>(&self, records: I) -> Result<ProcessOutput, PipelineError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut summary = RunSummary::default();

        tracing::info!(stage = ?Stage::Processing, "Processing records");
        let accepted = self.gate(records, &mut summary)?;
        self.checkpoint(Stage::Processing)?;

        let extracted = self.extract_all(accepted)?;
        self.checkpoint(Stage::Processing)?;

        let (items, indexes) = self.index_all(extracted, &mut summary)?;
        summary.accepted = items.len();
        self.checkpoint(Stage::Aggregating)?;

        tracing::info!(stage = ?Stage::Aggregating, items = items.len(), "Aggregating");
        let aggregates = aggregate(&items);

        Ok(ProcessOutput {
            items,
            indexes,
            aggregates,
            summary,
        })
    }

    fn checkpoint(&self, stage: Stage) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            tracing::warn!(stage = ?stage, "Run cancelled");
            return Err(PipelineError::Cancelled(stage));
        }
        Ok(())
    }

    fn gate<I>(&self, records: I, summary: &mut RunSummary) -> Result<Vec<AcceptedRecord>, PipelineError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut dedup = Deduplicator::new();
        let mut accepted = Vec::new();

        for record in records {
            self.checkpoint(Stage::Processing)?;
            summary.records_seen += 1;

            let title = record.title.clone();
            match dedup.try_accept(record) {
                Ok(rec) => accepted.push(rec),
                Err(reason @ Rejection::Malformed(_)) => {
                    summary.rejected_malformed += 1;
                    tracing::info!(title = %title, reason = %reason, "Skipping malformed record");
                }
                Err(reason @ Rejection::Duplicate { .. }) => {
                    summary.rejected_duplicate += 1;
                    tracing::debug!(title = %title, reason = %reason, "Skipping duplicate record");
                }
            }
        }

        Ok(accepted)
    }

    fn extract_all(&self, accepted: Vec<AcceptedRecord>) -> Result<Vec<ProcessedItem>, PipelineError> {
        // Order-preserving collect: output[i] comes from accepted[i].
        let extract = || -> Vec<ProcessedItem> {
            accepted
                .into_par_iter()
                .map(|record| self.extractor.extract(record))
                .collect()
        };

        if self.config.workers == 0 {
            return Ok(extract());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()?;
        Ok(pool.install(extract))
    }

    fn index_all(
        &self,
        extracted: Vec<ProcessedItem>,
        summary: &mut RunSummary,
    ) -> Result<(Vec<ProcessedItem>, KnowledgeIndexes), PipelineError> {
        let mut indexer = Indexer::new(self.config.graph_scope);
        let mut items = Vec::with_capacity(extracted.len());

        for mut item in extracted {
            self.checkpoint(Stage::Processing)?;

            if !(0.0..=1.0).contains(&item.confidence) {
                self.on_violation(
                    InvariantViolation::ConfidenceOutOfRange {
                        id: item.id.clone(),
                        value: item.confidence,
                    },
                    summary,
                )?;
                item.confidence = repair_confidence(item.confidence);
            }

            debug_assert!(
                keywords_well_formed(&item.keywords),
                "malformed keywords on {}",
                item.id
            );

            match indexer.index(&item) {
                Ok(()) => items.push(item),
                Err(IndexError::DuplicateId(id)) => {
                    self.on_violation(InvariantViolation::DuplicateId(id), summary)?;
                }
            }
        }

        debug_assert_eq!(indexer.indexed_count(), items.len());
        Ok((items, indexer.into_indexes()))
    }

    fn on_violation(
        &self,
        violation: InvariantViolation,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        if self.config.strict_invariants {
            tracing::error!(violation = %violation, "Invariant violated, aborting run");
            return Err(violation.into());
        }
        tracing::warn!(violation = %violation, "Invariant violated, repairing and continuing");
        summary.invariant_warnings += 1;
        Ok(())
    }
}

fn repair_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn keywords_well_formed(keywords: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(keywords.len());
    keywords.len() <= MAX_KEYWORDS
        && keywords
            .iter()
            .all(|k| k.len() >= MIN_KEYWORD_CHARS && !is_stopword(k) && seen.insert(k.as_str()))
}
