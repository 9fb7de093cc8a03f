//! The composed pipeline: loader → cleaner → cached clean table → views.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{SnapshotCell, ViewMemo};
use crate::cleaning::{clean_with_report, CleanReport};
use crate::config::PipelineOptions;
use crate::error::CatalogResult;
use crate::execution::{ExecutionEngine, ExecutionObserver};
use crate::ingestion::{CatalogLoader, IngestionSeverity, TracingObserver};
use crate::types::{CleanTable, RawTable};
use crate::views::{AggregateView, ViewKind};

/// Owns the loader, the cached clean table and the per-view memo.
///
/// The raw snapshot lives for as long as the pipeline. The clean table is built on first
/// use (once, even under concurrent callers) and kept until [`CatalogPipeline::invalidate`].
///
/// ```no_run
/// use catalog_views::config::PipelineOptions;
/// use catalog_views::pipeline::CatalogPipeline;
/// use catalog_views::views::ViewKind;
///
/// # fn main() -> Result<(), catalog_views::CatalogError> {
/// let pipeline = CatalogPipeline::new(PipelineOptions::default().with_source("data/netflix.csv"))?;
/// let top = pipeline.view(ViewKind::TopCountries)?;
/// println!("{}", top.rows_json()?);
/// # Ok(())
/// # }
/// ```
pub struct CatalogPipeline {
    options: PipelineOptions,
    loader: CatalogLoader,
    clean: SnapshotCell<CleanTable>,
    last_report: Mutex<Option<CleanReport>>,
    memo: ViewMemo,
    engine: ExecutionEngine,
}

impl fmt::Debug for CatalogPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogPipeline")
            .field("options", &self.options)
            .field("loader", &self.loader)
            .field("clean_cached", &self.clean.is_populated())
            .field("memoized_views", &self.memo.len())
            .finish()
    }
}

impl CatalogPipeline {
    /// Build a pipeline reading `options.source`, logging ingestion outcomes through `tracing`.
    pub fn new(options: PipelineOptions) -> CatalogResult<Self> {
        let loader = CatalogLoader::new(options.source.clone())
            .with_format(options.format)
            .with_observer(Arc::new(TracingObserver), IngestionSeverity::Critical);
        Self::with_loader(loader, options)
    }

    /// Build a pipeline around an existing loader. `options.source` and `options.format` are
    /// ignored in favour of the loader's own.
    pub fn with_loader(loader: CatalogLoader, options: PipelineOptions) -> CatalogResult<Self> {
        let engine = ExecutionEngine::new(&options.execution)?;
        Ok(Self {
            options,
            loader,
            clean: SnapshotCell::new(),
            last_report: Mutex::new(None),
            memo: ViewMemo::new(),
            engine,
        })
    }

    /// Report per-view execution events to `observer`.
    pub fn with_execution_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    /// The raw snapshot (read from the source on first use).
    pub fn raw_table(&self) -> CatalogResult<Arc<RawTable>> {
        self.loader.load_raw()
    }

    /// The cleaned table, built once and shared until invalidated.
    pub fn clean_table(&self) -> CatalogResult<Arc<CleanTable>> {
        if let Some(table) = self.clean.get() {
            return Ok(table);
        }
        self.clean.get_or_try_init(|| {
            let raw = self.loader.load_raw()?;
            let start = Instant::now();
            let (table, report) = clean_with_report(&raw);
            info!(
                rows = report.output_rows,
                duplicates_removed = report.duplicates_removed,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "clean table built"
            );
            *self.last_report.lock() = Some(report);
            Ok(table)
        })
    }

    /// Report of the most recent cleaning pass, if one has run.
    pub fn clean_report(&self) -> Option<CleanReport> {
        *self.last_report.lock()
    }

    /// Compute (or fetch the memoized) `kind`.
    pub fn view(&self, kind: ViewKind) -> CatalogResult<Arc<AggregateView>> {
        if self.options.cache_views {
            if let Some(view) = self.memo.get(kind) {
                debug!(view = %kind, "view memo hit");
                return Ok(view);
            }
        }

        let table = self.clean_table()?;
        let view = Arc::new(self.engine.compute_view(&table, kind, &self.options.aggregation));
        Ok(self.remember(kind, view))
    }

    /// Compute several views, in parallel where they are not memoized yet.
    ///
    /// Results come back in request order; a kind requested twice appears twice.
    pub fn views(&self, kinds: &[ViewKind]) -> CatalogResult<Vec<(ViewKind, Arc<AggregateView>)>> {
        let mut missing: Vec<ViewKind> = Vec::new();
        for &kind in kinds {
            let memoized = self.options.cache_views && self.memo.get(kind).is_some();
            if !memoized && !missing.contains(&kind) {
                missing.push(kind);
            }
        }

        let mut fresh: Vec<(ViewKind, Arc<AggregateView>)> = Vec::with_capacity(missing.len());
        if !missing.is_empty() {
            let table = self.clean_table()?;
            for (kind, view) in self
                .engine
                .compute_views(&table, &missing, &self.options.aggregation)
            {
                fresh.push((kind, self.remember(kind, Arc::new(view))));
            }
        }

        let out = kinds
            .iter()
            .filter_map(|&kind| {
                fresh
                    .iter()
                    .find(|(k, _)| *k == kind)
                    .map(|(_, v)| Arc::clone(v))
                    .or_else(|| self.memo.get(kind))
                    .map(|view| (kind, view))
            })
            .collect();
        Ok(out)
    }

    /// Every view in [`ViewKind::ALL`] order.
    pub fn all_views(&self) -> CatalogResult<Vec<(ViewKind, Arc<AggregateView>)>> {
        self.views(&ViewKind::ALL)
    }

    /// Number of memoized views.
    pub fn memoized_views(&self) -> usize {
        self.memo.len()
    }

    /// Drop the clean table and every memoized view. The raw snapshot is kept, so the next
    /// request re-cleans without re-reading the source.
    pub fn invalidate(&self) {
        let dropped_table = self.clean.take().is_some();
        let dropped_views = self.memo.len();
        self.memo.clear();
        info!(dropped_table, dropped_views, "view cache invalidated");
    }

    fn remember(&self, kind: ViewKind, view: Arc<AggregateView>) -> Arc<AggregateView> {
        if self.options.cache_views {
            self.memo.insert(kind, view)
        } else {
            view
        }
    }
}
