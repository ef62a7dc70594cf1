//! Caller-side reducer that forwards every operation across the sandbox boundary.

use crate::module::SandboxModule;
use crate::protocol::{Reply, Request};
use arc_swap::ArcSwapOption;
use log::debug;
use std::num::NonZeroUsize;
use std::sync::Arc;
use view_model::{
    Action, EngineError, EngineKind, EngineResult, ItemRef, ViewEngine, ViewSnapshot,
};

/// Reducer backed by the sandboxed store.
///
/// Holds no view state of its own. Until a module is attached every call
/// fails with [`EngineError::NotLoaded`].
pub struct SandboxReducer {
    module: ArcSwapOption<SandboxModule>,
}

impl SandboxReducer {
    /// Creates a reducer with no module attached.
    pub fn new() -> Self {
        Self {
            module: ArcSwapOption::empty(),
        }
    }

    /// Creates a reducer already bound to `module`.
    pub fn with_module(module: SandboxModule) -> Self {
        let reducer = Self::new();
        reducer.attach(module);
        reducer
    }

    /// Binds the reducer to a loaded module.
    pub fn attach(&self, module: SandboxModule) {
        self.module.store(Some(Arc::new(module)));
    }

    /// Drops the binding; later calls fail with `NotLoaded`.
    pub fn detach(&self) {
        self.module.store(None);
    }

    /// Returns true once a module is attached.
    pub fn is_loaded(&self) -> bool {
        self.module.load().is_some()
    }

    /// Replaces the sandboxed store with an empty one.
    pub fn init(&self, items_per_page: NonZeroUsize) -> EngineResult<()> {
        match self.call(Request::InitStore { items_per_page })? {
            Reply::Ack => Ok(()),
            _ => Err(EngineError::Protocol("init_store expects an ack")),
        }
    }

    /// Sends the full collection across the boundary.
    pub fn set_items(&self, items: &[ItemRef]) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::SetItems {
            items: items.to_vec(),
        })
    }

    /// Sets or clears the tag filter.
    pub fn filter_by_tag(&self, tag: Option<String>) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::FilterByTag { tag })
    }

    /// Sets or clears the playability filter.
    pub fn filter_by_playable(&self, playable: Option<bool>) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::FilterByPlayable { playable })
    }

    /// Sorts by rating.
    pub fn sort_by_rating(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::SortByRating)
    }

    /// Sorts by title.
    pub fn sort_by_title(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::SortByTitle)
    }

    /// Flips the sort direction.
    pub fn toggle_sort_order(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::ToggleSortOrder)
    }

    /// Jumps to `page`, clamped by the sandbox.
    pub fn set_page(&self, page: usize) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::SetPage { page })
    }

    /// Advances one page.
    pub fn next_page(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::NextPage)
    }

    /// Goes back one page.
    pub fn prev_page(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::PrevPage)
    }

    /// Reads the items on the current page.
    pub fn get_page_items(&self) -> EngineResult<Vec<ItemRef>> {
        match self.call(Request::GetPageItems)? {
            Reply::Items(items) => Ok(items),
            _ => Err(EngineError::Protocol("get_page_items expects items")),
        }
    }

    /// Reads the view summary.
    pub fn get_view_state(&self) -> EngineResult<ViewSnapshot> {
        self.call_view(Request::GetViewState)
    }

    fn call(&self, request: Request) -> EngineResult<Reply> {
        let guard = self.module.load();
        let Some(module) = guard.as_deref() else {
            return Err(EngineError::NotLoaded);
        };
        module.call(&request)
    }

    fn call_view(&self, request: Request) -> EngineResult<ViewSnapshot> {
        match self.call(request)? {
            Reply::View(view) => Ok(view),
            _ => Err(EngineError::Protocol("expected a view reply")),
        }
    }
}

impl Default for SandboxReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewEngine for SandboxReducer {
    fn kind(&self) -> EngineKind {
        EngineKind::Sandboxed
    }

    fn dispatch(&mut self, action: &Action) -> EngineResult<ViewSnapshot> {
        match action {
            Action::SetItems(items) => self.set_items(items),
            Action::FilterByTag(tag) => self.filter_by_tag(tag.clone()),
            Action::FilterByPlayable(playable) => self.filter_by_playable(*playable),
            Action::SortByRating => self.sort_by_rating(),
            Action::SortByTitle => self.sort_by_title(),
            Action::ToggleSortOrder => self.toggle_sort_order(),
            Action::SetPage(page) => self.set_page(*page),
            Action::NextPage => self.next_page(),
            Action::PrevPage => self.prev_page(),
            Action::Unknown => {
                debug!("sandbox ignoring unrecognised action");
                self.get_view_state()
            }
        }
    }

    fn view(&self) -> EngineResult<ViewSnapshot> {
        self.get_view_state()
    }

    fn page_items(&self) -> EngineResult<Vec<ItemRef>> {
        self.get_page_items()
    }
}
