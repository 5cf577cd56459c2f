use serde::{Deserialize, Serialize};

use crate::index::GraphScope;

// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whether relation sets may pick up ids from other categories.
    pub graph_scope: GraphScope,
    /// Abort on an invariant violation instead of repairing it.
    pub strict_invariants: bool,
    /// Extraction workers. `0` uses the global rayon pool.
    pub workers: usize,
}

impl PipelineConfig {
    pub fn v0() -> Self {
        Self {
            graph_scope: GraphScope::Global,
            strict_invariants: cfg!(debug_assertions),
            workers: 0,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::v0()
    }
}
