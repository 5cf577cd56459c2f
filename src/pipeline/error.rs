use thiserror::Error;

use super::Stage;
use crate::store::StoreError;
use crate::types::ItemId;

#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("Confidence {value} of item {id} is outside [0, 1]")]
    ConfidenceOutOfRange { id: ItemId, value: f64 },
    #[error("Item id {0} minted twice")]
    DuplicateId(ItemId),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Run cancelled during {0:?}")]
    Cancelled(Stage),
    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),
}
