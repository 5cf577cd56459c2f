//! Deterministic knowledge deduplication and indexing engine.
//!
//! `knowledge-core` turns harvested text records into a deduplicated,
//! scored, and indexed corpus: first-seen-wins duplicate detection over
//! normalized text, keyword and summary extraction, source-based confidence
//! scoring, an inverted keyword index, per-category relation sets, and
//! aggregate views. Identical inputs in identical order always produce
//! identical artifacts, apart from the informational timestamps.

pub mod aggregate;
pub mod dedup;
pub mod extract;
pub mod index;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod types;

pub use pipeline::{Pipeline, PipelineConfig, PipelineError, RunSummary};
