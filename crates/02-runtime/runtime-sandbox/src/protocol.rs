//! Request and reply messages exchanged with the sandbox worker.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use view_model::{ItemRef, ViewSnapshot};

/// Calls accepted by the sandbox.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Request {
    /// Replace the store with an empty one using this page size.
    InitStore {
        /// Page size of the fresh store.
        items_per_page: NonZeroUsize,
    },
    /// Replace the collection; filters and sort are kept.
    SetItems {
        /// New collection.
        items: Vec<ItemRef>,
    },
    /// Set or clear the tag filter.
    FilterByTag {
        /// Tag to require, `None` clears.
        tag: Option<String>,
    },
    /// Set or clear the playability filter.
    FilterByPlayable {
        /// Required flag, `None` clears.
        playable: Option<bool>,
    },
    /// Sort by rating.
    SortByRating,
    /// Sort by title.
    SortByTitle,
    /// Flip the sort direction.
    ToggleSortOrder,
    /// Jump to a page, clamped.
    SetPage {
        /// Zero-based page.
        page: usize,
    },
    /// Advance one page if possible.
    NextPage,
    /// Go back one page if possible.
    PrevPage,
    /// Read the current page slice.
    GetPageItems,
    /// Read the view summary.
    GetViewState,
    /// Stop serving and release the store.
    Shutdown,
}

impl Request {
    /// Stable label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::InitStore { .. } => "init_store",
            Request::SetItems { .. } => "set_items",
            Request::FilterByTag { .. } => "filter_by_tag",
            Request::FilterByPlayable { .. } => "filter_by_playable",
            Request::SortByRating => "sort_by_rating",
            Request::SortByTitle => "sort_by_title",
            Request::ToggleSortOrder => "toggle_sort_order",
            Request::SetPage { .. } => "set_page",
            Request::NextPage => "next_page",
            Request::PrevPage => "prev_page",
            Request::GetPageItems => "get_page_items",
            Request::GetViewState => "get_view_state",
            Request::Shutdown => "shutdown",
        }
    }
}

/// Replies produced by the sandbox, one per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Reply {
    /// Request accepted with nothing to report.
    Ack,
    /// View summary after the request.
    View(ViewSnapshot),
    /// Current page slice.
    Items(Vec<ItemRef>),
    /// The sandbox could not act on the request.
    Fault(String),
}
