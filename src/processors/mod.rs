pub mod header_registry;
pub mod ingest;
pub mod loader;
pub mod normalizer;

pub use header_registry::HeaderRegistry;
pub use ingest::{FileFailure, IngestOptions, IngestPipeline, IngestReport};
pub use loader::{BulkLoader, LoadSummary};
pub use normalizer::{NormalizedFile, RecordNormalizer};
