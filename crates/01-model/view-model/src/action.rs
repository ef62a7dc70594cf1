//! Transitions accepted by every reducer runtime.
//!
//! Actions serialize as `{"type": "FILTER_BY_TAG", "payload": "Horror"}`.
//! Any `type` this build does not know decodes to [`Action::Unknown`], which
//! every runtime treats as a no-op.

use crate::item::ItemRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single view-state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the item collection; resets the page.
    SetItems(Arc<[ItemRef]>),
    /// Set or clear the tag filter; resets the page.
    FilterByTag(Option<String>),
    /// Set or clear the playability filter; resets the page.
    FilterByPlayable(Option<bool>),
    /// Sort by rating, keeping the page.
    SortByRating,
    /// Sort by title, keeping the page.
    SortByTitle,
    /// Flip the sort direction, keeping the page.
    ToggleSortOrder,
    /// Jump to a page, clamped into range.
    SetPage(usize),
    /// Advance one page unless already on the last.
    NextPage,
    /// Go back one page unless already on the first.
    PrevPage,
    /// Any action this build does not recognise.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Stable label used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetItems(_) => "SET_ITEMS",
            Action::FilterByTag(_) => "FILTER_BY_TAG",
            Action::FilterByPlayable(_) => "FILTER_BY_PLAYABLE",
            Action::SortByRating => "SORT_BY_RATING",
            Action::SortByTitle => "SORT_BY_TITLE",
            Action::ToggleSortOrder => "TOGGLE_SORT_ORDER",
            Action::SetPage(_) => "SET_PAGE",
            Action::NextPage => "NEXT_PAGE",
            Action::PrevPage => "PREV_PAGE",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Returns true for transitions that reset the page to zero.
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            Action::SetItems(_) | Action::FilterByTag(_) | Action::FilterByPlayable(_)
        )
    }
}
