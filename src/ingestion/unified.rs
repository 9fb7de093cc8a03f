//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which reads a catalog file into an in-memory
//! [`crate::types::RawTable`].
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::types::RawTable;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// Fails with [`CatalogError::SourceNotFound`] before touching any reader when `path` does not
/// exist. When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use catalog_views::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), catalog_views::CatalogError> {
/// let raw = ingest_from_path("data/netflix.csv", &IngestionOptions::default())?;
/// println!("rows={}", raw.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> CatalogResult<RawTable> {
    let path = path.as_ref();
    let start = Instant::now();
    let fmt = options.format.or_else(|| infer_format_from_path(path).ok());

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let result = if !path.exists() {
        Err(CatalogError::SourceNotFound {
            path: path.to_path_buf(),
        })
    } else {
        let resolved = match fmt {
            Some(f) => Ok(f),
            None => infer_format_from_path(path),
        };
        resolved.and_then(|f| match f {
            IngestionFormat::Csv => csv::ingest_csv_from_path(path),
            IngestionFormat::Json => json::ingest_json_from_path(path),
        })
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: table.row_count(),
                    elapsed: start.elapsed(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &CatalogError) -> IngestionSeverity {
    match e {
        CatalogError::SourceNotFound { .. } | CatalogError::Io(_) => IngestionSeverity::Critical,
        CatalogError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        CatalogError::Json(_)
        | CatalogError::SchemaMismatch { .. }
        | CatalogError::ParseError { .. }
        | CatalogError::ThreadPool(_) => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> CatalogResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CatalogError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| CatalogError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
