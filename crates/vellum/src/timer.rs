//! One-shot timers armed on the backend event loop.
//!
//! Timer handles are `Arc` because the last reference may be dropped from
//! a thread other than the loop thread; all state is behind atomics or a
//! mutex for the same reason. The firing callback itself lives in the
//! backend's entry for the timer, not here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub struct Timer {
    deadline: Mutex<Instant>,
    cancelled: AtomicBool,
    fired: AtomicBool,
}

impl Timer {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            deadline: Mutex::new(Instant::now() + timeout),
            cancelled: AtomicBool::new(false),
            fired: AtomicBool::new(false),
        }
    }

    /// Stop the timer. Its callback entry is dropped on the next loop turn.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the timer has fired and was not re-armed since.
    pub fn passed(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Milliseconds until the deadline; zero once due.
    pub fn left_ms(&self) -> f64 {
        let deadline = *self.deadline.lock();
        deadline.saturating_duration_since(Instant::now()).as_secs_f64() * 1000.0
    }

    /// Re-arm with a new timeout measured from now.
    pub fn update_timeout(&self, timeout: Duration) {
        *self.deadline.lock() = Instant::now() + timeout;
        self.fired.store(false, Ordering::SeqCst);
    }

    pub(crate) fn due(&self, now: Instant) -> bool {
        *self.deadline.lock() <= now
    }

    pub(crate) fn deadline(&self) -> Instant {
        *self.deadline.lock()
    }

    pub(crate) fn mark_fired(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }
}
