//! View store living inside the sandbox worker.
//!
//! The store keeps its own copy of the item collection and represents the
//! projection as indices into it. Only counts, flags, and page windows ever
//! leave the store.

use std::num::NonZeroUsize;
use view_model::{max_page, page_range, ItemRef, SortKey, ViewCriteria, ViewSnapshot};

pub(crate) struct SandboxStore {
    items: Vec<ItemRef>,
    filtered: Vec<usize>,
    current_page: usize,
    items_per_page: NonZeroUsize,
    criteria: ViewCriteria,
}

impl SandboxStore {
    pub(crate) fn new(items_per_page: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            current_page: 0,
            items_per_page,
            criteria: ViewCriteria::default(),
        }
    }

    pub(crate) fn set_items(&mut self, items: Vec<ItemRef>) {
        self.filtered = project_indices(&items, &self.criteria);
        self.items = items;
        self.current_page = 0;
    }

    pub(crate) fn filter_by_tag(&mut self, tag: Option<String>) {
        let criteria = ViewCriteria {
            filter_tag: tag,
            ..self.criteria.clone()
        };
        self.commit(criteria, true);
    }

    pub(crate) fn filter_by_playable(&mut self, playable: Option<bool>) {
        let criteria = ViewCriteria {
            filter_playable: playable,
            ..self.criteria.clone()
        };
        self.commit(criteria, true);
    }

    pub(crate) fn sort_by(&mut self, key: SortKey) {
        let criteria = ViewCriteria {
            sort_by: Some(key),
            ..self.criteria.clone()
        };
        self.commit(criteria, false);
    }

    pub(crate) fn toggle_sort_order(&mut self) {
        let criteria = ViewCriteria {
            sort_order: self.criteria.sort_order.toggled(),
            ..self.criteria.clone()
        };
        self.commit(criteria, false);
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.current_page = page.min(self.max_page());
    }

    pub(crate) fn next_page(&mut self) {
        if self.current_page < self.max_page() {
            self.current_page += 1;
        }
    }

    pub(crate) fn prev_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }

    pub(crate) fn page_items(&self) -> Vec<ItemRef> {
        let range = page_range(self.current_page, self.items_per_page, self.filtered.len());
        self.filtered[range]
            .iter()
            .map(|&idx| ItemRef::clone(&self.items[idx]))
            .collect()
    }

    pub(crate) fn view_state(&self) -> ViewSnapshot {
        ViewSnapshot {
            filtered_count: self.filtered.len(),
            current_page: self.current_page,
            items_per_page: self.items_per_page,
            filter_tag: self.criteria.filter_tag.clone(),
            filter_playable: self.criteria.filter_playable,
            sort_by: self.criteria.sort_by,
            sort_order: self.criteria.sort_order,
            total_items: self.items.len(),
        }
    }

    fn max_page(&self) -> usize {
        max_page(self.filtered.len(), self.items_per_page)
    }

    /// Projects under `criteria` first, then swaps all fields in at once.
    fn commit(&mut self, criteria: ViewCriteria, reset_page: bool) {
        let filtered = project_indices(&self.items, &criteria);
        self.filtered = filtered;
        self.criteria = criteria;
        self.current_page = if reset_page {
            0
        } else {
            self.current_page.min(self.max_page())
        };
    }
}

fn project_indices(items: &[ItemRef], criteria: &ViewCriteria) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len())
        .filter(|&idx| criteria.admits(&items[idx]))
        .collect();
    if criteria.sort_by.is_some() {
        indices.sort_by(|&a, &b| criteria.compare(&items[a], &items[b]));
    }
    indices
}
