use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::record::RawRecord;

/// Combined dump written by the harvester; records carry their own category.
pub const COMBINED_FILE: &str = "knowledge_base.json";
/// Harvester bookkeeping, never records.
pub const HARVEST_SUMMARY_FILE: &str = "harvest_summary.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub records: usize,
    /// Entries that did not parse as a record and were skipped.
    pub malformed: usize,
}

/// Records parsed from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRecords {
    pub records: Vec<RawRecord>,
    pub malformed: usize,
}

/// A file that could not be read. The run continues without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<RawRecord>,
    pub loaded: Vec<LoadedFile>,
    pub failures: Vec<LoadFailure>,
    /// Skipped entries across all loaded files.
    pub malformed: usize,
}

/// Reads one JSON array of records, filling absent categories from the
/// file name.
///
/// Only a file that is unreadable or not a JSON array is an error. An entry
/// that does not parse as a record is skipped and counted.
pub fn load_file(path: &Path) -> Result<FileRecords, LoadError> {
    let bytes = fs::read(path)?;
    let entries: Vec<Value> = serde_json::from_slice(&bytes)?;
    let category = category_from_path(path);

    let mut loaded = FileRecords::default();
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(entry) {
            Ok(mut record) => {
                if record.category.is_none() {
                    record.category = category.clone();
                }
                loaded.records.push(record);
            }
            Err(e) => {
                loaded.malformed += 1;
                tracing::info!(path = %path.display(), position, error = %e, "Skipping malformed record");
            }
        }
    }

    Ok(loaded)
}

/// Loads files in the order given. Unreadable files are reported, not fatal.
pub fn load_records(paths: &[PathBuf]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for path in paths {
        match load_file(path) {
            Ok(file) => {
                tracing::debug!(
                    path = %path.display(),
                    records = file.records.len(),
                    malformed = file.malformed,
                    "Loaded record file"
                );
                outcome.loaded.push(LoadedFile {
                    path: path.clone(),
                    records: file.records.len(),
                    malformed: file.malformed,
                });
                outcome.malformed += file.malformed;
                outcome.records.extend(file.records);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record file");
                outcome.failures.push(LoadFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// Record files in a harvest directory, in ingestion order:
/// the combined dump first, then per-category files sorted by name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut combined = None;
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(COMBINED_FILE) => combined = Some(path),
            Some(HARVEST_SUMMARY_FILE) => {}
            _ => files.push(path),
        }
    }

    files.sort();
    Ok(combined.into_iter().chain(files).collect())
}

/// Expands directories via [`discover_inputs`] and loads everything.
///
/// Plain files keep the order given. A directory that cannot be listed is
/// reported like an unreadable file.
pub fn load_inputs(paths: &[PathBuf]) -> LoadOutcome {
    let mut resolved = Vec::new();
    let mut listing_failures = Vec::new();

    for path in paths {
        if path.is_dir() {
            match discover_inputs(path) {
                Ok(found) => resolved.extend(found),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable input directory");
                    listing_failures.push(LoadFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        } else {
            resolved.push(path.clone());
        }
    }

    let mut outcome = load_records(&resolved);
    listing_failures.append(&mut outcome.failures);
    outcome.failures = listing_failures;
    outcome
}

/// `machine_learning.json` -> `Machine Learning`.
///
/// Returns `None` for the combined dump, whose records name their own
/// category.
pub fn category_from_path(path: &Path) -> Option<String> {
    if path.file_name().and_then(|n| n.to_str()) == Some(COMBINED_FILE) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    Some(title_case(&stem.replace('_', " ")))
}

// Uppercase a letter that follows a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}
