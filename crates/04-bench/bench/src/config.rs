use crate::ops::BenchOp;
use std::num::NonZeroUsize;
use std::time::Duration;
use timing::LONG_TASK_THRESHOLD;
use view_model::DEFAULT_ITEMS_PER_PAGE;

/// Samples taken per variant per operation.
pub const DEFAULT_ITERATIONS: usize = 20;
/// Pause between operations, outside every timed window.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Collection sizes offered by the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataSize {
    /// 10 000 items.
    #[default]
    Small,
    /// 20 000 items.
    Medium,
    /// 50 000 items.
    Large,
}

impl DataSize {
    /// Every size, smallest first.
    pub const ALL: [DataSize; 3] = [DataSize::Small, DataSize::Medium, DataSize::Large];

    /// Number of items generated for this size.
    pub const fn count(self) -> usize {
        match self {
            DataSize::Small => 10_000,
            DataSize::Medium => 20_000,
            DataSize::Large => 50_000,
        }
    }

    /// Maps an item count back onto the menu.
    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.count() == count)
    }
}

/// Knobs for one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Samples per variant per operation.
    pub iterations: usize,
    /// Delay awaited between operations.
    pub settle_delay: Duration,
    /// Operations to run, in order.
    pub operations: Vec<BenchOp>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            settle_delay: DEFAULT_SETTLE_DELAY,
            operations: BenchOp::MENU.to_vec(),
        }
    }
}

/// Knobs for an interactive session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Page size for both engines.
    pub items_per_page: NonZeroUsize,
    /// Benchmark settings.
    pub bench: BenchConfig,
    /// Dispatches longer than this count as long tasks.
    pub long_task_threshold: Duration,
    /// Disable to run without a long-task counter.
    pub track_long_tasks: bool,
    /// Seed for generated items; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            bench: BenchConfig::default(),
            long_task_threshold: LONG_TASK_THRESHOLD,
            track_long_tasks: true,
            seed: None,
        }
    }
}
