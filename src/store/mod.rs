pub mod loader;
pub mod writer;

pub use loader::{
    category_from_path, discover_inputs, load_file, load_inputs, load_records, FileRecords,
    LoadError, LoadFailure, LoadOutcome, LoadedFile,
};
pub use writer::{
    ArtifactWriter, Artifacts, KnowledgeDatabase, StoreError, CATEGORY_STATS_FILE, DATABASE_FILE,
    INDEXES_FILE, QUICK_LOOKUP_FILE, REPORT_FILE, SUMMARY_FILE,
};
