//! Memoization primitives used by the loader and the pipeline.
//!
//! [`SnapshotCell`] is a capacity-one, single-flight cell: the first caller runs the
//! initializer while holding the slot lock, so concurrent first callers block and then observe
//! the same `Arc`. [`ViewMemo`] memoizes computed views per [`ViewKind`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::views::{AggregateView, ViewKind};

/// Capacity-one cell populated at most once per invalidation.
pub struct SnapshotCell<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> SnapshotCell<T> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Current value, if populated.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().clone()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Return the cached value, or run `init` to populate the cell.
    ///
    /// `init` runs with the slot locked: at most one initializer executes at a time and callers
    /// arriving meanwhile wait for its result. Errors are returned to the caller that ran `init`
    /// and leave the cell empty. `init` must not access this same cell.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = self.slot.lock();
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(init()?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Empty the cell, returning the previous value.
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot.lock().take()
    }
}

impl<T> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SnapshotCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCell")
            .field("populated", &self.is_populated())
            .finish()
    }
}

/// Per-kind memo of computed views.
#[derive(Debug, Default)]
pub struct ViewMemo {
    views: Mutex<HashMap<ViewKind, Arc<AggregateView>>>,
}

impl ViewMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ViewKind) -> Option<Arc<AggregateView>> {
        self.views.lock().get(&kind).cloned()
    }

    /// Store `view` unless another caller stored one first; returns the stored view.
    pub fn insert(&self, kind: ViewKind, view: Arc<AggregateView>) -> Arc<AggregateView> {
        Arc::clone(self.views.lock().entry(kind).or_insert(view))
    }

    pub fn len(&self) -> usize {
        self.views.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.views.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{SnapshotCell, ViewMemo};
    use crate::views::{AggregateView, CategoryCount, ViewKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn concurrent_first_access_runs_init_once() {
        let cell = Arc::new(SnapshotCell::<Vec<u32>>::new());
        let inits = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let inits = Arc::clone(&inits);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cell.get_or_try_init(|| {
                        inits.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        Ok::<_, ()>(vec![1, 2, 3])
                    })
                    .unwrap()
                })
            })
            .collect();

        let values: Vec<Arc<Vec<u32>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(inits.load(Ordering::SeqCst), 1);
        for v in &values {
            assert!(Arc::ptr_eq(v, &values[0]));
        }
    }

    #[test]
    fn failed_init_leaves_cell_empty() {
        let cell = SnapshotCell::<u32>::new();
        let err = cell.get_or_try_init(|| Err::<u32, _>("boom")).unwrap_err();
        assert_eq!(err, "boom");
        assert!(!cell.is_populated());

        let v = cell.get_or_try_init(|| Ok::<_, &str>(7)).unwrap();
        assert_eq!(*v, 7);
        assert_eq!(cell.take().as_deref(), Some(&7));
        assert!(cell.get().is_none());
    }

    #[test]
    fn view_memo_keeps_first_insert() {
        let memo = ViewMemo::new();
        let first = Arc::new(AggregateView::Counts(vec![CategoryCount::new("a", 1)]));
        let second = Arc::new(AggregateView::Counts(Vec::new()));

        let stored = memo.insert(ViewKind::TopCountries, Arc::clone(&first));
        assert!(Arc::ptr_eq(&stored, &first));
        let stored = memo.insert(ViewKind::TopCountries, second);
        assert!(Arc::ptr_eq(&stored, &first));
        assert_eq!(memo.len(), 1);

        memo.clear();
        assert!(memo.is_empty());
        assert!(memo.get(ViewKind::TopCountries).is_none());
    }
}
