//! Time source for development build suffixes.

use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies the current Unix epoch in seconds.
pub trait Clock: Send + Sync {
    fn epoch_seconds(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Manually driven clock for tests.
///
/// Starts at a fixed instant and advances by `step` seconds after every read.
/// A step of zero gives a frozen clock.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    /// A clock frozen at `epoch_seconds`
    pub fn fixed(epoch_seconds: i64) -> Self {
        ManualClock {
            now: AtomicI64::new(epoch_seconds),
            step: 0,
        }
    }

    /// A clock that moves forward by `step` seconds on each read
    pub fn advancing(start: i64, step: i64) -> Self {
        ManualClock {
            now: AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn epoch_seconds(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}
