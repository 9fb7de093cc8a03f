//! Execution engine for computing several views with configurable parallelism.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Parallel evaluation of independent [`ViewKind`]s over one shared, read-only clean table
//! - A throttle on how many views are computed at once
//! - Real-time metrics + observer hooks for monitoring

mod observer;
mod semaphore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AggregationOptions;
use crate::error::CatalogResult;
use crate::types::CleanTable;
use crate::views::{AggregateView, ViewKind};

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, TracingExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism. `Some(0)` is treated as one.
    pub num_threads: Option<usize>,
    /// Upper bound on views computed at once, on top of `num_threads`.
    ///
    /// If `None`, bounded only by the pool size.
    pub max_in_flight_views: Option<usize>,
}

/// Computes [`AggregateView`]s on a dedicated rayon pool.
pub struct ExecutionEngine {
    pool: ThreadPool,
    max_in_flight_views: usize,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    pub fn new(opts: &ExecutionOptions) -> CatalogResult<Self> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("catalog-views-{i}"))
            .build()?;

        Ok(Self {
            pool,
            max_in_flight_views: opts.max_in_flight_views.unwrap_or(n_threads).max(1),
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Compute a single view on the calling thread.
    pub fn compute_view(&self, table: &CleanTable, kind: ViewKind, options: &AggregationOptions) -> AggregateView {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted { views: 1 });

        let view = self.compute_one(table, kind, options);

        self.finish_run(start);
        view
    }

    /// Compute `kinds` in parallel. Results come back in request order.
    pub fn compute_views(
        &self,
        table: &CleanTable,
        kinds: &[ViewKind],
        options: &AggregationOptions,
    ) -> Vec<(ViewKind, AggregateView)> {
        self.pool.install(|| {
            let start = Instant::now();
            self.metrics.begin_run();
            self.emit(ExecutionEvent::RunStarted { views: kinds.len() });

            let sem = Semaphore::new(self.max_in_flight_views);
            let out: Vec<(ViewKind, AggregateView)> = kinds
                .par_iter()
                .map(|&kind| {
                    let waited = sem.acquire();
                    if waited > Duration::ZERO {
                        self.metrics.on_throttle_wait(waited);
                        self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                    }
                    let view = self.compute_one(table, kind, options);
                    sem.release();
                    (kind, view)
                })
                .collect();

            self.finish_run(start);
            out
        })
    }

    fn compute_one(&self, table: &CleanTable, kind: ViewKind, options: &AggregationOptions) -> AggregateView {
        self.metrics.on_view_start();
        self.emit(ExecutionEvent::ViewStarted { kind });

        let start = Instant::now();
        let view = kind.compute(table, options);
        let elapsed = start.elapsed();
        debug!(
            view = %kind,
            rows = view.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "view computed"
        );

        self.metrics.on_view_end(view.len());
        self.emit(ExecutionEvent::ViewFinished {
            kind,
            rows: view.len(),
            elapsed,
        });
        view
    }

    fn finish_run(&self, start: Instant) {
        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
