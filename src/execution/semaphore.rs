use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A small, blocking counting semaphore.
///
/// Bounds how many views are computed at once, independently of the pool size.
pub(crate) struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

impl Semaphore {
    /// Create a semaphore with `permits` slots (at least one).
    pub(crate) fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits.max(1)),
            cv: Condvar::new(),
        }
    }

    /// Acquire one permit, blocking until available.
    ///
    /// Returns the time spent waiting (zero if no wait was required).
    pub(crate) fn acquire(&self) -> Duration {
        let start = Instant::now();
        let mut waited = false;
        let mut permits = self.permits.lock();
        while *permits == 0 {
            waited = true;
            self.cv.wait(&mut permits);
        }
        *permits -= 1;
        if waited { start.elapsed() } else { Duration::ZERO }
    }

    /// Release one permit.
    pub(crate) fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        self.cv.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::Semaphore;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn zero_permits_is_clamped_to_one() {
        let sem = Semaphore::new(0);
        assert_eq!(sem.acquire(), Duration::ZERO);
        sem.release();
    }

    #[test]
    fn blocked_acquire_waits_for_release() {
        let sem = Arc::new(Semaphore::new(1));
        sem.acquire();

        let sem2 = Arc::clone(&sem);
        let handle = thread::spawn(move || sem2.acquire());
        thread::sleep(Duration::from_millis(20));
        sem.release();

        let waited = handle.join().unwrap();
        assert!(waited > Duration::ZERO);
    }
}
