use crate::config::BenchConfig;
use crate::guard::RunFlag;
use crate::ops::BenchOp;
use crate::settle::{Settle, ThreadSleep};
use log::{info, warn};
use runtime_native::{NativeReducer, ViewReducer};
use runtime_sandbox::SandboxReducer;
use serde::Serialize;
use std::sync::Arc;
use timing::{format_ms, measure, BenchmarkResult, LongTaskCounter};
use view_model::{EngineKind, EngineResult, ItemRef, SortKey, SortOrder, ViewSnapshot, ViewState};

/// Comparison of both variants on one operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Operation label.
    pub operation: String,
    /// Native samples and statistics.
    pub native: BenchmarkResult,
    /// Sandboxed samples and statistics.
    pub sandboxed: BenchmarkResult,
    /// `native average / sandboxed average`; `None` when the sandboxed average is zero.
    pub speedup: Option<f64>,
}

impl OperationResult {
    fn new(op: BenchOp, native: BenchmarkResult, sandboxed: BenchmarkResult) -> Self {
        let speedup = (sandboxed.stats.average > 0.0)
            .then(|| native.stats.average / sandboxed.stats.average);
        Self {
            operation: op.label().to_string(),
            native,
            sandboxed,
            speedup,
        }
    }

    /// Mean native latency in milliseconds.
    pub fn native_time(&self) -> f64 {
        self.native.stats.average
    }

    /// Mean sandboxed latency in milliseconds.
    pub fn sandboxed_time(&self) -> f64 {
        self.sandboxed.stats.average
    }
}

/// Why a run did not start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    /// No item collection is loaded.
    NoItems,
    /// The sandboxed module is not attached.
    SandboxNotLoaded,
    /// Another run holds the run flag.
    AlreadyRunning,
}

impl Refusal {
    /// Human-readable reason.
    pub fn reason(self) -> &'static str {
        match self {
            Refusal::NoItems => "no items loaded",
            Refusal::SandboxNotLoaded => "sandboxed module not loaded",
            Refusal::AlreadyRunning => "a benchmark is already running",
        }
    }
}

/// Result of asking for a run.
#[derive(Clone, Debug, PartialEq)]
pub enum BenchmarkOutcome {
    /// One entry per operation, in menu order.
    Completed(Vec<OperationResult>),
    /// Nothing was measured.
    Refused(Refusal),
}

/// Drives the operation menu against both variants.
pub struct Orchestrator {
    config: BenchConfig,
    settle: Arc<dyn Settle>,
    long_tasks: Option<Arc<LongTaskCounter>>,
    flag: RunFlag,
}

impl Orchestrator {
    /// Orchestrator that sleeps between operations.
    pub fn new(config: BenchConfig) -> Self {
        Self::with_settle(config, Arc::new(ThreadSleep))
    }

    /// Orchestrator with a custom settle capability.
    pub fn with_settle(config: BenchConfig, settle: Arc<dyn Settle>) -> Self {
        Self {
            config,
            settle,
            long_tasks: None,
            flag: RunFlag::new(),
        }
    }

    /// Reports every timed unit to `counter`.
    pub fn with_long_tasks(mut self, counter: Arc<LongTaskCounter>) -> Self {
        self.long_tasks = Some(counter);
        self
    }

    /// Run settings.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// True while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.flag.is_running()
    }

    /// Measures every configured operation on both variants.
    ///
    /// Both variants start every operation from `native`: the native side
    /// works on a clone and the sandbox is replayed into the same view.
    /// Samples accumulate state within an operation. Afterwards the sandbox
    /// is replayed into the view it had before the run, over the benchmark
    /// items. `native` is never modified.
    pub async fn run(
        &self,
        native: &ViewState,
        sandbox: &SandboxReducer,
    ) -> EngineResult<BenchmarkOutcome> {
        if native.items().is_empty() {
            return Ok(refuse(Refusal::NoItems));
        }
        if !sandbox.is_loaded() {
            return Ok(refuse(Refusal::SandboxNotLoaded));
        }
        let Some(_ticket) = self.flag.try_start() else {
            return Ok(refuse(Refusal::AlreadyRunning));
        };

        let data_size = native.items().len();
        let start = native.snapshot();
        let prior = sandbox.get_view_state()?;
        info!(
            "benchmark: {} operations x {} iterations over {data_size} items",
            self.config.operations.len(),
            self.config.iterations
        );

        let mut results = Vec::with_capacity(self.config.operations.len());
        for (index, &op) in self.config.operations.iter().enumerate() {
            if index > 0 {
                self.settle.settle(self.config.settle_delay).await;
            }
            replay(sandbox, native.items(), &start)?;
            let result = self.measure_op(op, native, sandbox, data_size)?;
            info!(
                "{}: native {} sandboxed {}",
                result.operation,
                format_ms(result.native_time()),
                format_ms(result.sandboxed_time())
            );
            results.push(result);
        }

        replay(sandbox, native.items(), &prior)?;
        Ok(BenchmarkOutcome::Completed(results))
    }

    fn measure_op(
        &self,
        op: BenchOp,
        native: &ViewState,
        sandbox: &SandboxReducer,
        data_size: usize,
    ) -> EngineResult<OperationResult> {
        let action = op.action();
        let mut state = native.clone();
        let mut native_times = Vec::with_capacity(self.config.iterations);
        let mut sandboxed_times = Vec::with_capacity(self.config.iterations);

        for _ in 0..self.config.iterations {
            let native_run = measure(|| NativeReducer.apply(&state, &action));
            self.observe(native_run.elapsed);
            native_times.push(native_run.millis());
            state = native_run.result;

            let sandboxed_run = measure(|| op.call(sandbox));
            self.observe(sandboxed_run.elapsed);
            let millis = sandboxed_run.millis();
            sandboxed_run.result?;
            sandboxed_times.push(millis);
        }

        Ok(OperationResult::new(
            op,
            BenchmarkResult::new(EngineKind::Native, data_size, op.label(), native_times),
            BenchmarkResult::new(EngineKind::Sandboxed, data_size, op.label(), sandboxed_times),
        ))
    }

    fn observe(&self, elapsed: std::time::Duration) {
        if let Some(counter) = &self.long_tasks {
            counter.observe(elapsed);
        }
    }
}

fn refuse(refusal: Refusal) -> BenchmarkOutcome {
    warn!("benchmark refused: {}", refusal.reason());
    BenchmarkOutcome::Refused(refusal)
}

/// Rebuilds the sandbox store so it reports `view` over `items`.
pub fn replay(
    sandbox: &SandboxReducer,
    items: &[ItemRef],
    view: &ViewSnapshot,
) -> EngineResult<()> {
    sandbox.init(view.items_per_page)?;
    sandbox.set_items(items)?;
    sandbox.filter_by_tag(view.filter_tag.clone())?;
    sandbox.filter_by_playable(view.filter_playable)?;
    match view.sort_by {
        Some(SortKey::Rating) => {
            sandbox.sort_by_rating()?;
        }
        Some(SortKey::Title) => {
            sandbox.sort_by_title()?;
        }
        None => {}
    }
    if view.sort_order == SortOrder::Desc {
        sandbox.toggle_sort_order()?;
    }
    sandbox.set_page(view.current_page)?;
    Ok(())
}
