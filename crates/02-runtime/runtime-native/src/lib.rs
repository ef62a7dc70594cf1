#![deny(missing_docs)]
//! Native reducer runtime: transitions are pure functions over [`ViewState`] values.
//!
//! Every transition builds a new state value and leaves its input untouched.
//! [`NativeEngine`] owns exactly one state and swaps it wholesale, which is
//! the only mutation this runtime performs.

use log::debug;
use std::num::NonZeroUsize;
use std::sync::Arc;
use view_model::{
    Action, EngineKind, EngineResult, ItemRef, SortKey, ViewCriteria, ViewEngine, ViewSnapshot,
    ViewState,
};

/// Trait for reducing actions into successor states.
pub trait ViewReducer {
    /// Reduces an action against `state` into a new state.
    fn apply(&self, state: &ViewState, action: &Action) -> ViewState;
}

/// The in-process value reducer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeReducer;

impl ViewReducer for NativeReducer {
    fn apply(&self, state: &ViewState, action: &Action) -> ViewState {
        match action {
            Action::SetItems(items) => {
                state.reproject(Arc::clone(items), state.criteria().clone(), 0)
            }
            Action::FilterByTag(tag) => refilter(
                state,
                ViewCriteria {
                    filter_tag: tag.clone(),
                    ..state.criteria().clone()
                },
            ),
            Action::FilterByPlayable(playable) => refilter(
                state,
                ViewCriteria {
                    filter_playable: *playable,
                    ..state.criteria().clone()
                },
            ),
            Action::SortByRating => resort(
                state,
                ViewCriteria {
                    sort_by: Some(SortKey::Rating),
                    ..state.criteria().clone()
                },
            ),
            Action::SortByTitle => resort(
                state,
                ViewCriteria {
                    sort_by: Some(SortKey::Title),
                    ..state.criteria().clone()
                },
            ),
            Action::ToggleSortOrder => resort(
                state,
                ViewCriteria {
                    sort_order: state.criteria().sort_order.toggled(),
                    ..state.criteria().clone()
                },
            ),
            Action::SetPage(page) => state.with_page(*page),
            Action::NextPage => {
                if state.current_page() < state.max_page() {
                    state.with_page(state.current_page() + 1)
                } else {
                    state.clone()
                }
            }
            Action::PrevPage => {
                if state.current_page() > 0 {
                    state.with_page(state.current_page() - 1)
                } else {
                    state.clone()
                }
            }
            Action::Unknown => {
                debug!("ignoring unknown action");
                state.clone()
            }
        }
    }
}

/// Filter changes reset the page.
fn refilter(state: &ViewState, criteria: ViewCriteria) -> ViewState {
    state.reproject(Arc::clone(state.items()), criteria, 0)
}

/// Sort changes keep the page.
fn resort(state: &ViewState, criteria: ViewCriteria) -> ViewState {
    state.reproject(Arc::clone(state.items()), criteria, state.current_page())
}

/// Applies `action` with the native reducer.
pub fn apply(state: &ViewState, action: &Action) -> ViewState {
    NativeReducer.apply(state, action)
}

/// Owner of a single native view state.
#[derive(Clone, Debug, Default)]
pub struct NativeEngine {
    state: ViewState,
}

impl NativeEngine {
    /// Creates an engine over an empty state with the given page size.
    pub fn new(items_per_page: NonZeroUsize) -> Self {
        Self::from_state(ViewState::new(items_per_page))
    }

    /// Creates an engine that continues from an existing state.
    pub fn from_state(state: ViewState) -> Self {
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Consumes the engine, returning its state.
    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Applies `action` and replaces the owned state with the result.
    pub fn apply(&mut self, action: &Action) -> &ViewState {
        debug!("native {}", action.name());
        self.state = NativeReducer.apply(&self.state, action);
        &self.state
    }
}

impl ViewEngine for NativeEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Native
    }

    fn dispatch(&mut self, action: &Action) -> EngineResult<ViewSnapshot> {
        Ok(self.apply(action).snapshot())
    }

    fn view(&self) -> EngineResult<ViewSnapshot> {
        Ok(self.state.snapshot())
    }

    fn page_items(&self) -> EngineResult<Vec<ItemRef>> {
        Ok(self.state.page_items().to_vec())
    }
}
