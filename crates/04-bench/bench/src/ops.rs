use runtime_sandbox::SandboxReducer;
use view_model::{Action, EngineResult, ViewSnapshot};

/// Tag used by the tag-filter operation.
pub const BENCH_TAG: &str = "Action";

/// One entry of the benchmark menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BenchOp {
    /// Filter to [`BENCH_TAG`].
    FilterByTag,
    /// Keep playable items only.
    FilterByPlayable,
    /// Sort by rating.
    SortByRating,
    /// Sort by title.
    SortByTitle,
    /// Flip the sort direction.
    ToggleSortOrder,
    /// Advance one page.
    NextPage,
}

impl BenchOp {
    /// The fixed menu, in run order.
    pub const MENU: [BenchOp; 6] = [
        BenchOp::FilterByTag,
        BenchOp::FilterByPlayable,
        BenchOp::SortByRating,
        BenchOp::SortByTitle,
        BenchOp::ToggleSortOrder,
        BenchOp::NextPage,
    ];

    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            BenchOp::FilterByTag => "Filter by Tag",
            BenchOp::FilterByPlayable => "Filter by Playable",
            BenchOp::SortByRating => "Sort by Rating",
            BenchOp::SortByTitle => "Sort by Title",
            BenchOp::ToggleSortOrder => "Toggle Sort Order",
            BenchOp::NextPage => "Next Page",
        }
    }

    /// Action fed to the native reducer.
    pub fn action(self) -> Action {
        match self {
            BenchOp::FilterByTag => Action::FilterByTag(Some(BENCH_TAG.to_string())),
            BenchOp::FilterByPlayable => Action::FilterByPlayable(Some(true)),
            BenchOp::SortByRating => Action::SortByRating,
            BenchOp::SortByTitle => Action::SortByTitle,
            BenchOp::ToggleSortOrder => Action::ToggleSortOrder,
            BenchOp::NextPage => Action::NextPage,
        }
    }

    /// The matching sandbox call.
    pub fn call(self, sandbox: &SandboxReducer) -> EngineResult<ViewSnapshot> {
        match self {
            BenchOp::FilterByTag => sandbox.filter_by_tag(Some(BENCH_TAG.to_string())),
            BenchOp::FilterByPlayable => sandbox.filter_by_playable(Some(true)),
            BenchOp::SortByRating => sandbox.sort_by_rating(),
            BenchOp::SortByTitle => sandbox.sort_by_title(),
            BenchOp::ToggleSortOrder => sandbox.toggle_sort_order(),
            BenchOp::NextPage => sandbox.next_page(),
        }
    }
}
