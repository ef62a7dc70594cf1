use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of a sample set in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Arithmetic mean.
    pub average: f64,
    /// Population variance.
    pub variance: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

/// Summarises `samples`. An empty slice yields all zeros.
pub fn aggregate(samples: &[f64]) -> Stats {
    if samples.is_empty() {
        return Stats::default();
    }
    let n = samples.len() as f64;
    let average = samples.iter().sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|sample| (sample - average).powi(2))
        .sum::<f64>()
        / n;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Stats {
        average,
        variance,
        min,
        max,
    }
}

/// [`aggregate`] over durations.
pub fn aggregate_durations(samples: &[Duration]) -> Stats {
    let millis: Vec<f64> = samples.iter().copied().map(duration_ms).collect();
    aggregate(&millis)
}

/// Converts a duration to fractional milliseconds.
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
