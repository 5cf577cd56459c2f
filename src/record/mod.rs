pub mod metadata;
pub mod raw;

pub use metadata::Metadata;
pub use raw::{RawRecord, DEFAULT_CATEGORY, DEFAULT_SOURCE};
