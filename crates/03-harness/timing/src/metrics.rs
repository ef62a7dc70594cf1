use crate::stats::{aggregate, duration_ms, Stats};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Timing of one interactive dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMetric {
    /// Milliseconds spent in the transition.
    pub dispatch_time: f64,
    /// Milliseconds since the log was created.
    pub timestamp: f64,
}

/// Append-only record of dispatch timings.
#[derive(Clone, Debug)]
pub struct MetricsLog {
    origin: Instant,
    entries: Vec<DispatchMetric>,
}

impl MetricsLog {
    /// Starts an empty log; timestamps count from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Records a dispatch that took `elapsed`.
    pub fn push(&mut self, elapsed: Duration) -> DispatchMetric {
        let metric = DispatchMetric {
            dispatch_time: duration_ms(elapsed),
            timestamp: duration_ms(self.origin.elapsed()),
        };
        self.entries.push(metric);
        metric
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded dispatches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> &[DispatchMetric] {
        &self.entries
    }

    /// Statistics over dispatch times, or `None` when empty.
    pub fn summary(&self) -> Option<Stats> {
        if self.entries.is_empty() {
            return None;
        }
        let times: Vec<f64> = self.entries.iter().map(|m| m.dispatch_time).collect();
        Some(aggregate(&times))
    }
}

impl Default for MetricsLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tracks_pushed_entries() {
        let mut log = MetricsLog::new();
        assert_eq!(log.summary(), None);

        log.push(Duration::from_millis(2));
        log.push(Duration::from_millis(4));
        assert_eq!(log.len(), 2);
        let summary = log.summary().unwrap();
        assert!((summary.average - 3.0).abs() < 1e-9);
        assert!(log.entries()[0].timestamp <= log.entries()[1].timestamp);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn metric_serializes_camel_case() {
        let metric = DispatchMetric {
            dispatch_time: 1.5,
            timestamp: 10.0,
        };
        let json = serde_json::to_value(metric).unwrap();
        assert_eq!(json["dispatchTime"], 1.5);
        assert_eq!(json["timestamp"], 10.0);
    }
}
