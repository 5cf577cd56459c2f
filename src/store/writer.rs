use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::{CategoryStats, IntegrationReport, QuickLookup};
use crate::index::KnowledgeIndexes;
use crate::pipeline::RunSummary;
use crate::types::ProcessedItem;

pub const DATABASE_FILE: &str = "knowledge_database.json";
pub const INDEXES_FILE: &str = "knowledge_indexes.json";
pub const CATEGORY_STATS_FILE: &str = "category_statistics.json";
pub const QUICK_LOOKUP_FILE: &str = "quick_lookup.json";
pub const REPORT_FILE: &str = "integration_report.json";
pub const SUMMARY_FILE: &str = "run_summary.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDatabase {
    pub items: Vec<ProcessedItem>,
    pub generated_at: DateTime<Utc>, // informational only
    pub total_items: usize,
}

impl KnowledgeDatabase {
    pub fn new(items: Vec<ProcessedItem>, generated_at: DateTime<Utc>) -> Self {
        let total_items = items.len();
        Self {
            items,
            generated_at,
            total_items,
        }
    }
}

/// Everything a completed run persists.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub database: KnowledgeDatabase,
    pub indexes: KnowledgeIndexes,
    pub category_stats: BTreeMap<String, CategoryStats>,
    pub quick_lookup: QuickLookup,
    pub report: IntegrationReport,
    pub summary: RunSummary,
}

/// Writes artifacts into one directory.
///
/// Each file is written to a `.tmp` sibling, synced, then renamed over the
/// final name, so a crash never leaves a half-written artifact behind.
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write(&self, artifacts: &Artifacts) -> Result<Vec<PathBuf>, StoreError> {
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(StoreError::NotADirectory(self.output_dir.clone()));
        }
        fs::create_dir_all(&self.output_dir)?;

        let written = vec![
            self.write_json(DATABASE_FILE, &artifacts.database)?,
            self.write_json(INDEXES_FILE, &artifacts.indexes)?,
            self.write_json(CATEGORY_STATS_FILE, &artifacts.category_stats)?,
            self.write_json(QUICK_LOOKUP_FILE, &artifacts.quick_lookup)?,
            self.write_json(REPORT_FILE, &artifacts.report)?,
            self.write_json(SUMMARY_FILE, &artifacts.summary)?,
        ];

        tracing::info!(
            output_dir = %self.output_dir.display(),
            files = written.len(),
            "Persisted knowledge artifacts"
        );
        Ok(written)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, StoreError> {
        let final_path = self.output_dir.join(name);
        let temp_path = self.output_dir.join(format!("{name}.tmp"));

        if let Err(e) = Self::write_synced(&temp_path, value) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &final_path)?;
        Ok(final_path)
    }

    fn write_synced<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let f = fs::File::create(path)?;
        serde_json::to_writer_pretty(&f, value)?;
        f.sync_all()?;
        Ok(())
    }
}
