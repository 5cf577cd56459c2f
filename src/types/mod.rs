pub mod identifiers;
pub mod item;

pub use identifiers::{ContentHash, ItemId, SimilarityFingerprint};
pub use item::{ItemRef, ProcessedItem};
