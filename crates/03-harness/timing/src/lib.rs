#![deny(missing_docs)]
//! Wall-clock measurement and summary statistics for reducer transitions.
//!
//! Everything here is synchronous. [`measure`] only accepts a plain closure,
//! so nothing can suspend inside a timed window.

mod long_task;
mod metrics;
mod report;
mod stats;

pub use long_task::{LongTaskCounter, LONG_TASK_THRESHOLD};
pub use metrics::{DispatchMetric, MetricsLog};
pub use report::{format_ms, format_result, BenchmarkResult};
pub use stats::{aggregate, aggregate_durations, duration_ms, Stats};

use std::time::{Duration, Instant};

/// A closure's return value and how long it ran.
#[derive(Clone, Debug)]
pub struct Timed<T> {
    /// What the closure returned.
    pub result: T,
    /// Wall-clock time between entry and return.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in fractional milliseconds.
    pub fn millis(&self) -> f64 {
        duration_ms(self.elapsed)
    }
}

/// Runs `op` between two clock reads.
pub fn measure<T>(op: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let result = op();
    let elapsed = start.elapsed();
    Timed { result, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn measure_returns_result_and_covers_the_closure() {
        let timed = measure(|| {
            thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(timed.result, 7);
        assert!(timed.elapsed >= Duration::from_millis(2));
        assert!(timed.millis() >= 2.0);
    }
}
