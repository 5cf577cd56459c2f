use serde::{Deserialize, Serialize};

use crate::store::{LoadFailure, LoadedFile};

/// Counts for one run, written alongside the artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records_seen: usize,
    pub accepted: usize,
    pub rejected_malformed: usize,
    pub rejected_duplicate: usize,
    pub invariant_warnings: usize,
    pub files_loaded: Vec<LoadedFile>,
    pub io_failures: Vec<LoadFailure>,
}

impl RunSummary {
    pub fn rejected(&self) -> usize {
        self.rejected_malformed + self.rejected_duplicate
    }

    pub fn has_io_failures(&self) -> bool {
        !self.io_failures.is_empty()
    }
}
