//! Native view-state container and the lightweight snapshot both runtimes report.

use crate::criteria::{SortKey, SortOrder, ViewCriteria};
use crate::item::ItemRef;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

/// Page size used when callers do not pick one.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Highest valid page index for `filtered_len` items.
pub fn max_page(filtered_len: usize, per_page: NonZeroUsize) -> usize {
    filtered_len.saturating_sub(1) / per_page.get()
}

/// Page count shown to users; an empty projection still has one page.
pub fn total_pages(filtered_len: usize, per_page: NonZeroUsize) -> usize {
    filtered_len.div_ceil(per_page.get()).max(1)
}

/// Index range of `page` within a projection of `filtered_len` items.
///
/// Pages past the end yield an empty range.
pub fn page_range(page: usize, per_page: NonZeroUsize, filtered_len: usize) -> Range<usize> {
    let start = page.saturating_mul(per_page.get()).min(filtered_len);
    let end = start.saturating_add(per_page.get()).min(filtered_len);
    start..end
}

/// Full state of one native reducer instance.
///
/// Values are replaced wholesale on every transition. Item collections are
/// shared behind `Arc`s so a transition that only moves the page does not copy
/// the projection.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    items: Arc<[ItemRef]>,
    filtered_items: Arc<[ItemRef]>,
    current_page: usize,
    items_per_page: NonZeroUsize,
    criteria: ViewCriteria,
}

impl ViewState {
    /// Creates an empty state with a fixed page size.
    pub fn new(items_per_page: NonZeroUsize) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            filtered_items: Arc::from(Vec::new()),
            current_page: 0,
            items_per_page,
            criteria: ViewCriteria::default(),
        }
    }

    /// Builds the successor state for new items and criteria.
    ///
    /// The projection is recomputed from scratch and `current_page` is clamped
    /// into the new page range.
    pub fn reproject(
        &self,
        items: Arc<[ItemRef]>,
        criteria: ViewCriteria,
        current_page: usize,
    ) -> Self {
        let filtered_items: Arc<[ItemRef]> = Arc::from(criteria.project(&items));
        let current_page = current_page.min(max_page(filtered_items.len(), self.items_per_page));
        Self {
            items,
            filtered_items,
            current_page,
            items_per_page: self.items_per_page,
            criteria,
        }
    }

    /// Builds the successor state with a different page, sharing the projection.
    ///
    /// `page` is clamped to [`ViewState::max_page`].
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            current_page: page.min(self.max_page()),
            ..self.clone()
        }
    }

    /// Unfiltered source-of-truth collection.
    pub fn items(&self) -> &Arc<[ItemRef]> {
        &self.items
    }

    /// Current projection.
    pub fn filtered_items(&self) -> &[ItemRef] {
        &self.filtered_items
    }

    /// Zero-based page index.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page size fixed at construction.
    pub fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    /// Active filter and sort criteria.
    pub fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    /// Highest valid page for the current projection.
    pub fn max_page(&self) -> usize {
        max_page(self.filtered_items.len(), self.items_per_page)
    }

    /// Items on the current page.
    pub fn page_items(&self) -> &[ItemRef] {
        let range = page_range(
            self.current_page,
            self.items_per_page,
            self.filtered_items.len(),
        );
        &self.filtered_items[range]
    }

    /// Lightweight summary of this state.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            filtered_count: self.filtered_items.len(),
            current_page: self.current_page,
            items_per_page: self.items_per_page,
            filter_tag: self.criteria.filter_tag.clone(),
            filter_playable: self.criteria.filter_playable,
            sort_by: self.criteria.sort_by,
            sort_order: self.criteria.sort_order,
            total_items: self.items.len(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Counts and flags describing a view, without any item payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    /// Number of items in the projection.
    pub filtered_count: usize,
    /// Zero-based page index.
    pub current_page: usize,
    /// Page size.
    pub items_per_page: NonZeroUsize,
    /// Active tag filter.
    pub filter_tag: Option<String>,
    /// Active playability filter.
    pub filter_playable: Option<bool>,
    /// Active sort key.
    pub sort_by: Option<SortKey>,
    /// Active sort direction.
    pub sort_order: SortOrder,
    /// Number of items in the unfiltered collection.
    pub total_items: usize,
}

impl ViewSnapshot {
    /// Highest valid page index.
    pub fn max_page(&self) -> usize {
        max_page(self.filtered_count, self.items_per_page)
    }

    /// Page count shown to users.
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count, self.items_per_page)
    }

    /// Filter and sort criteria carried by the snapshot.
    pub fn criteria(&self) -> ViewCriteria {
        ViewCriteria {
            filter_tag: self.filter_tag.clone(),
            filter_playable: self.filter_playable,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}
