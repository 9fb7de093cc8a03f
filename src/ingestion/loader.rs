//! The catalog loader: reads the source once per process and hands out a shared snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use tracing::{debug, info};

use crate::cache::SnapshotCell;
use crate::error::CatalogResult;
use crate::types::RawTable;

use super::observability::{IngestionObserver, IngestionSeverity};
use super::unified::{ingest_from_path, IngestionFormat, IngestionOptions};

/// Loads the raw catalog at most once.
///
/// The first successful [`CatalogLoader::load_raw`] populates a single-slot snapshot that is
/// never evicted; later calls return the same `Arc` without touching storage. Concurrent first
/// calls are serialized so the source is read once and every caller sees the same table.
#[derive(Debug)]
pub struct CatalogLoader {
    source: PathBuf,
    options: IngestionOptions,
    snapshot: SnapshotCell<RawTable>,
    reads: AtomicUsize,
}

impl CatalogLoader {
    /// Create a loader for `source`, inferring the format from its extension.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            options: IngestionOptions::default(),
            snapshot: SnapshotCell::new(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Replace the ingestion options wholesale.
    pub fn with_options(mut self, options: IngestionOptions) -> Self {
        self.options = options;
        self
    }

    /// Force a format instead of inferring it from the extension.
    pub fn with_format(mut self, format: Option<IngestionFormat>) -> Self {
        self.options.format = format;
        self
    }

    /// Report ingestion outcomes to `observer`, alerting at or above `alert_at_or_above`.
    pub fn with_observer(
        mut self,
        observer: Arc<dyn IngestionObserver>,
        alert_at_or_above: IngestionSeverity,
    ) -> Self {
        self.options.observer = Some(observer);
        self.options.alert_at_or_above = alert_at_or_above;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Return the raw snapshot, reading the source on first use.
    ///
    /// Fails with [`crate::CatalogError::SourceNotFound`] if the source is absent. Failures are
    /// not cached; the next call attempts the read again.
    pub fn load_raw(&self) -> CatalogResult<Arc<RawTable>> {
        if let Some(table) = self.snapshot.get() {
            debug!(path = %self.source.display(), "raw catalog snapshot hit");
            return Ok(table);
        }

        self.snapshot.get_or_try_init(|| {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let start = Instant::now();
            let table = ingest_from_path(&self.source, &self.options)?;
            info!(
                path = %self.source.display(),
                rows = table.row_count(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "raw catalog loaded"
            );
            Ok(table)
        })
    }

    /// Whether the snapshot has been populated.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_populated()
    }

    /// Number of times the source was actually read (including failed attempts).
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}
