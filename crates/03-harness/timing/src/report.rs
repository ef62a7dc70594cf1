use crate::stats::{aggregate, Stats};
use serde::Serialize;
use view_model::EngineKind;

/// Raw samples and summary for one variant on one operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Variant that produced the samples.
    pub reducer_type: EngineKind,
    /// Item count loaded during the run.
    pub data_size: usize,
    /// Display label of the operation.
    pub operation_type: String,
    /// Samples in milliseconds, in iteration order.
    pub times: Vec<f64>,
    /// Summary of `times`.
    #[serde(flatten)]
    pub stats: Stats,
}

impl BenchmarkResult {
    /// Builds a result and computes its statistics.
    pub fn new(
        reducer_type: EngineKind,
        data_size: usize,
        operation_type: impl Into<String>,
        times: Vec<f64>,
    ) -> Self {
        let stats = aggregate(&times);
        Self {
            reducer_type,
            data_size,
            operation_type: operation_type.into(),
            times,
            stats,
        }
    }
}

/// Renders milliseconds with three decimals, e.g. `1.250ms`.
pub fn format_ms(ms: f64) -> String {
    format!("{ms:.3}ms")
}

/// Multi-line text summary of a result.
pub fn format_result(result: &BenchmarkResult) -> String {
    format!(
        "[{kind}] {op} ({size} items)\n  Average: {avg}\n  Variance: {var:.4}\n  Min: {min}\n  Max: {max}\n  Samples: {samples}",
        kind = result.reducer_type.as_str().to_uppercase(),
        op = result.operation_type,
        size = result.data_size,
        avg = format_ms(result.stats.average),
        var = result.stats.variance,
        min = format_ms(result.stats.min),
        max = format_ms(result.stats.max),
        samples = result.times.len(),
    )
}
