//! Ingestion entrypoints and implementations (the loader side of the pipeline).
//!
//! Most callers should use [`CatalogLoader`], which reads the source once and hands out a shared
//! [`crate::types::RawTable`] snapshot. [`ingest_from_path`] (from [`unified`]) is the uncached
//! read underneath it:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - fails with [`crate::CatalogError::SourceNotFound`] when the source is absent
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;
pub mod loader;
pub mod observability;
mod record;
pub mod unified;

pub use loader::CatalogLoader;
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
