use log::warn;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Units of synchronous work longer than this count as long tasks.
pub const LONG_TASK_THRESHOLD: Duration = Duration::from_millis(50);

/// Counts synchronous work units that overran a threshold.
#[derive(Debug)]
pub struct LongTaskCounter {
    threshold: Duration,
    count: AtomicUsize,
}

impl LongTaskCounter {
    /// Starts at zero with [`LONG_TASK_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_threshold(LONG_TASK_THRESHOLD)
    }

    /// Starts at zero with a custom threshold.
    pub fn with_threshold(threshold: Duration) -> Self {
        Self {
            threshold,
            count: AtomicUsize::new(0),
        }
    }

    /// Units strictly longer than this are counted.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Counts `elapsed` if it is over the threshold. Returns true when counted.
    pub fn observe(&self, elapsed: Duration) -> bool {
        if elapsed <= self.threshold {
            return false;
        }
        self.count.fetch_add(1, Ordering::Relaxed);
        warn!(
            "long task detected: {:.2}ms",
            elapsed.as_secs_f64() * 1_000.0
        );
        true
    }

    /// Long tasks seen since creation or the last reset.
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Zeroes the count.
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl Default for LongTaskCounter {
    fn default() -> Self {
        Self::new()
    }
}
