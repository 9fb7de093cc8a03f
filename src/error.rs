use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type returned by loading, configuration and engine construction.
///
/// Cleaning and aggregation never fail: malformed cells degrade to a missing value instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog source does not exist at the configured location.
    #[error("catalog source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error (configuration files).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not conform to the catalog schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A required value could not be coerced (content-type tag, release year).
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// The worker pool for parallel view evaluation could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
