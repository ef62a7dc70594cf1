use crate::config::{DataSize, SessionConfig};
use crate::orchestrator::{replay, BenchmarkOutcome, OperationResult, Orchestrator};
use crate::settle::{Settle, ThreadSleep};
use item_source::{ItemSource, RandomItems};
use log::{info, warn};
use runtime_native::NativeEngine;
use runtime_sandbox::{LoadStatus, SandboxLoader, SandboxReducer};
use serde::Serialize;
use std::sync::Arc;
use timing::{format_ms, measure, DispatchMetric, LongTaskCounter, MetricsLog, Stats};
use view_model::{
    Action, EngineKind, EngineResult, ItemRef, SortKey, SortOrder, ViewEngine, ViewSnapshot,
};

/// Everything a front end needs to draw the current screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Engine serving interactive dispatches.
    pub reducer_type: EngineKind,
    /// Size of the last loaded collection; zero before the first load.
    pub data_size: usize,
    /// Items passing the filters.
    pub filtered_count: usize,
    /// Items loaded.
    pub total_items: usize,
    /// Zero-based page.
    pub current_page: usize,
    /// At least one.
    pub total_pages: usize,
    /// Items on the current page.
    pub page_items: Vec<ItemRef>,
    /// Active tag filter.
    pub filter_tag: Option<String>,
    /// Active playability filter.
    pub filter_playable: Option<bool>,
    /// Active sort key.
    pub sort_by: Option<SortKey>,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Statistics over dispatches since the last reset.
    pub metrics_summary: Option<Stats>,
    /// Long tasks since the last reset, when tracked.
    pub long_tasks: Option<usize>,
    /// Results of the last completed benchmark.
    pub benchmark_results: Vec<OperationResult>,
}

impl Presentation {
    fn new(
        session: &Session,
        view: ViewSnapshot,
        page_items: Vec<ItemRef>,
    ) -> Self {
        Self {
            reducer_type: session.reducer_type,
            data_size: session.loaded_count,
            filtered_count: view.filtered_count,
            total_items: view.total_items,
            current_page: view.current_page,
            total_pages: view.total_pages(),
            page_items,
            filter_tag: view.filter_tag,
            filter_playable: view.filter_playable,
            sort_by: view.sort_by,
            sort_order: view.sort_order,
            metrics_summary: session.metrics.summary(),
            long_tasks: session.long_tasks.as_ref().map(|counter| counter.get()),
            benchmark_results: session.benchmark_results.clone(),
        }
    }
}

/// Timings of a data load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Items generated.
    pub items: usize,
    /// Native `SET_ITEMS` time in milliseconds.
    pub native_ms: f64,
    /// Sandboxed load time, when the sandbox is attached.
    pub sandboxed_ms: Option<f64>,
}

/// Interactive owner of both engines, the loader, and the metrics.
///
/// The loader and the long-task counter live here and are dropped with the
/// session, which also shuts the sandbox worker down.
pub struct Session {
    config: SessionConfig,
    reducer_type: EngineKind,
    data_size: DataSize,
    loaded_count: usize,
    native: NativeEngine,
    sandbox: SandboxReducer,
    loader: SandboxLoader,
    source: Box<dyn ItemSource + Send>,
    metrics: MetricsLog,
    long_tasks: Option<Arc<LongTaskCounter>>,
    orchestrator: Orchestrator,
    benchmark_results: Vec<OperationResult>,
}

impl Session {
    /// Session with random items, the default loader, and real settle delays.
    pub fn new(config: SessionConfig) -> Self {
        let source: Box<dyn ItemSource + Send> = match config.seed {
            Some(seed) => Box::new(RandomItems::seeded(seed)),
            None => Box::new(RandomItems::from_entropy()),
        };
        Self::with_parts(config, source, SandboxLoader::new(), Arc::new(ThreadSleep))
    }

    /// Session assembled from explicit collaborators.
    pub fn with_parts(
        config: SessionConfig,
        source: Box<dyn ItemSource + Send>,
        loader: SandboxLoader,
        settle: Arc<dyn Settle>,
    ) -> Self {
        let long_tasks = config
            .track_long_tasks
            .then(|| Arc::new(LongTaskCounter::with_threshold(config.long_task_threshold)));
        let mut orchestrator = Orchestrator::with_settle(config.bench.clone(), settle);
        if let Some(counter) = &long_tasks {
            orchestrator = orchestrator.with_long_tasks(Arc::clone(counter));
        }
        Self {
            native: NativeEngine::new(config.items_per_page),
            sandbox: SandboxReducer::new(),
            reducer_type: EngineKind::default(),
            data_size: DataSize::default(),
            loaded_count: 0,
            loader,
            source,
            metrics: MetricsLog::new(),
            long_tasks,
            orchestrator,
            benchmark_results: Vec::new(),
            config,
        }
    }

    /// Acquires the sandbox module and replays the native view into it.
    ///
    /// Concurrent and repeated calls share one acquisition. On failure the
    /// session keeps working in native mode.
    pub async fn load_sandbox(&mut self) -> EngineResult<()> {
        if self.sandbox.is_loaded() {
            return Ok(());
        }
        let module = self.loader.load().await?;
        self.sandbox.attach(module);
        self.resync_sandbox()
    }

    /// Progress of the sandbox acquisition.
    pub fn sandbox_status(&self) -> LoadStatus {
        self.loader.status()
    }

    /// Switches the interactive engine and clears dispatch metrics.
    pub fn set_reducer_type(&mut self, kind: EngineKind) {
        info!("reducer type: {kind}");
        self.reducer_type = kind;
        self.reset_metrics();
    }

    /// Selects the size used by the next [`Session::load_data`].
    pub fn set_data_size(&mut self, size: DataSize) {
        self.data_size = size;
    }

    /// Generates a fresh collection and loads it into both engines.
    pub fn load_data(&mut self) -> EngineResult<LoadReport> {
        let items: Arc<[ItemRef]> = self
            .source
            .generate(self.data_size.count())
            .into_iter()
            .map(Arc::new)
            .collect();
        self.reset_metrics();

        let native = measure(|| {
            self.native.apply(&Action::SetItems(Arc::clone(&items)));
        });

        let sandboxed_ms = if self.sandbox.is_loaded() {
            let sandbox = &self.sandbox;
            let sandboxed = measure(|| -> EngineResult<()> {
                sandbox.set_items(&items)?;
                sandbox.get_page_items()?;
                Ok(())
            });
            let millis = sandboxed.millis();
            sandboxed.result?;
            Some(millis)
        } else {
            None
        };

        self.loaded_count = items.len();
        info!(
            "data loaded - native: {}, sandboxed: {}",
            format_ms(native.millis()),
            format_ms(sandboxed_ms.unwrap_or_default())
        );
        Ok(LoadReport {
            items: items.len(),
            native_ms: native.millis(),
            sandboxed_ms,
        })
    }

    /// Applies `action` on the interactive engine and records its timing.
    pub fn dispatch(&mut self, action: &Action) -> EngineResult<DispatchMetric> {
        let elapsed = match self.reducer_type {
            EngineKind::Native => {
                let native = &mut self.native;
                measure(|| {
                    native.apply(action);
                })
                .elapsed
            }
            EngineKind::Sandboxed => {
                let sandbox = &mut self.sandbox;
                let timed = measure(|| -> EngineResult<()> {
                    sandbox.dispatch(action)?;
                    sandbox.get_page_items()?;
                    Ok(())
                });
                timed.result?;
                timed.elapsed
            }
        };
        if let Some(counter) = &self.long_tasks {
            counter.observe(elapsed);
        }
        Ok(self.metrics.push(elapsed))
    }

    /// Runs the benchmark; refusals are reported, not raised.
    pub async fn run_benchmark(&mut self) -> EngineResult<BenchmarkOutcome> {
        let outcome = self
            .orchestrator
            .run(self.native.state(), &self.sandbox)
            .await?;
        if let BenchmarkOutcome::Completed(results) = &outcome {
            self.benchmark_results = results.clone();
        }
        Ok(outcome)
    }

    /// Current screen for the interactive engine.
    pub fn view(&self) -> EngineResult<Presentation> {
        let (view, page_items) = match self.reducer_type {
            EngineKind::Native => (self.native.view()?, self.native.page_items()?),
            EngineKind::Sandboxed => (self.sandbox.view()?, self.sandbox.page_items()?),
        };
        Ok(Presentation::new(self, view, page_items))
    }

    /// Rebuilds the sandbox store so it mirrors the native view.
    pub fn resync_sandbox(&self) -> EngineResult<()> {
        if !self.sandbox.is_loaded() {
            warn!("resync requested without a sandbox");
            return Ok(());
        }
        let view = self.native.view()?;
        replay(&self.sandbox, self.native.state().items(), &view)
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Interactive engine kind.
    pub fn reducer_type(&self) -> EngineKind {
        self.reducer_type
    }

    /// Selected data size.
    pub fn data_size(&self) -> DataSize {
        self.data_size
    }

    /// Native engine.
    pub fn native(&self) -> &NativeEngine {
        &self.native
    }

    /// Sandboxed reducer.
    pub fn sandbox(&self) -> &SandboxReducer {
        &self.sandbox
    }

    /// Dispatch timings since the last reset.
    pub fn metrics(&self) -> &MetricsLog {
        &self.metrics
    }

    /// Long-task counter, when tracked.
    pub fn long_tasks(&self) -> Option<&LongTaskCounter> {
        self.long_tasks.as_deref()
    }

    /// Results of the last completed benchmark.
    pub fn benchmark_results(&self) -> &[OperationResult] {
        &self.benchmark_results
    }

    fn reset_metrics(&mut self) {
        self.metrics.clear();
        if let Some(counter) = &self.long_tasks {
            counter.reset();
        }
    }
}
