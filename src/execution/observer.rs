use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::views::ViewKind;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { views: usize },
    ThrottleWaited { duration: Duration },
    ViewStarted { kind: ViewKind },
    ViewFinished {
        kind: ViewKind,
        rows: usize,
        elapsed: Duration,
    },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Forwards execution events to `tracing`.
///
/// Run boundaries are logged at `info`, per-view events at `debug`.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted { views } => info!(views, "view run started"),
            ExecutionEvent::ThrottleWaited { duration } => {
                debug!(waited_us = duration.as_micros() as u64, "view throttled")
            }
            ExecutionEvent::ViewStarted { kind } => debug!(view = %kind, "view started"),
            ExecutionEvent::ViewFinished { kind, rows, elapsed } => debug!(
                view = %kind,
                rows,
                elapsed_us = elapsed.as_micros() as u64,
                "view finished"
            ),
            ExecutionEvent::RunFinished { elapsed, metrics } => info!(
                elapsed_ms = elapsed.as_millis() as u64,
                %metrics,
                "view run finished"
            ),
        }
    }
}

/// Real-time metrics for an execution run.
///
/// The engine updates these counters during execution; callers can snapshot them at any time.
#[derive(Debug)]
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    started_at: Mutex<Option<Instant>>,
    elapsed_ns: AtomicU64,

    views_started: AtomicU64,
    views_finished: AtomicU64,
    rows_emitted: AtomicU64,
    throttle_wait_ns: AtomicU64,

    active_views: AtomicUsize,
    max_active_views: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            started_at: Mutex::new(None),
            elapsed_ns: AtomicU64::new(0),
            views_started: AtomicU64::new(0),
            views_finished: AtomicU64::new(0),
            rows_emitted: AtomicU64::new(0),
            throttle_wait_ns: AtomicU64::new(0),
            active_views: AtomicUsize::new(0),
            max_active_views: AtomicUsize::new(0),
        }
    }

    pub fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        *self.started_at.lock() = Some(Instant::now());

        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.views_started.store(0, Ordering::SeqCst);
        self.views_finished.store(0, Ordering::SeqCst);
        self.rows_emitted.store(0, Ordering::SeqCst);
        self.throttle_wait_ns.store(0, Ordering::SeqCst);
        self.active_views.store(0, Ordering::SeqCst);
        self.max_active_views.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns.store(saturating_nanos(elapsed), Ordering::SeqCst);
    }

    pub fn on_view_start(&self) {
        self.views_started.fetch_add(1, Ordering::SeqCst);
        let now = self.active_views.fetch_add(1, Ordering::SeqCst) + 1;
        update_max_usize(&self.max_active_views, now);
    }

    pub fn on_view_end(&self, rows: usize) {
        self.views_finished.fetch_add(1, Ordering::SeqCst);
        self.rows_emitted.fetch_add(rows as u64, Ordering::SeqCst);
        self.active_views.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn on_throttle_wait(&self, d: Duration) {
        self.throttle_wait_ns.fetch_add(saturating_nanos(d), Ordering::SeqCst);
    }

    /// Time since the current run began, if one has.
    pub fn running_for(&self) -> Option<Duration> {
        let started_at = *self.started_at.lock();
        started_at.map(|at| at.elapsed())
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        let elapsed = (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns));

        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed,
            views_started: self.views_started.load(Ordering::SeqCst),
            views_finished: self.views_finished.load(Ordering::SeqCst),
            rows_emitted: self.rows_emitted.load(Ordering::SeqCst),
            throttle_wait: Duration::from_nanos(self.throttle_wait_ns.load(Ordering::SeqCst)),
            max_active_views: self.max_active_views.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn saturating_nanos(d: Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}

fn update_max_usize(dst: &AtomicUsize, now: usize) {
    let _ = dst.fetch_max(now, Ordering::SeqCst);
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub views_started: u64,
    pub views_finished: u64,
    pub rows_emitted: u64,
    pub throttle_wait: Duration,
    pub max_active_views: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, views={}/{}, rows_emitted={}, max_active_views={}, throttle_wait={:?}, elapsed={:?}",
            self.run_id,
            self.views_finished,
            self.views_started,
            self.rows_emitted,
            self.max_active_views,
            self.throttle_wait,
            self.elapsed
        )
    }
}
