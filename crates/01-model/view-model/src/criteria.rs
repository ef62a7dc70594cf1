//! Filter predicates, sort keys, and the comparators both runtimes share.
//!
//! Filtering is applied tag first, then playability, and sorting always runs
//! last so it never affects which items pass. Sorting is stable in both
//! directions: descending order reverses the comparator rather than the
//! result, so equal keys keep their pre-sort relative order.

use crate::item::{Item, ItemRef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Key the projection is sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Numeric rating.
    Rating,
    /// Collated title.
    Title,
}

impl SortKey {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction applied to the active sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Applies the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four fields that fully determine a projection of an item collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCriteria {
    /// When set, only items carrying this tag pass.
    pub filter_tag: Option<String>,
    /// When set, only items whose playability matches pass.
    pub filter_playable: Option<bool>,
    /// Active sort key; `None` keeps source order.
    pub sort_by: Option<SortKey>,
    /// Direction applied to `sort_by`.
    pub sort_order: SortOrder,
}

impl ViewCriteria {
    /// Returns true when `item` passes both filters.
    pub fn admits(&self, item: &Item) -> bool {
        if let Some(tag) = self.filter_tag.as_deref() {
            if !item.has_tag(tag) {
                return false;
            }
        }
        match self.filter_playable {
            Some(playable) => item.is_playable == playable,
            None => true,
        }
    }

    /// Orders two items by the active key and direction.
    ///
    /// Returns `Equal` when no sort key is active.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ascending = match self.sort_by {
            None => return Ordering::Equal,
            Some(SortKey::Rating) => compare_ratings(a.rating, b.rating),
            Some(SortKey::Title) => compare_titles(&a.title, &b.title),
        };
        self.sort_order.apply(ascending)
    }

    /// Filters then stably sorts `items` into a fresh projection.
    pub fn project(&self, items: &[ItemRef]) -> Vec<ItemRef> {
        let mut projected: Vec<ItemRef> = items
            .iter()
            .filter(|item| self.admits(item))
            .cloned()
            .collect();
        if self.sort_by.is_some() {
            projected.sort_by(|a, b| self.compare(a, b));
        }
        projected
    }
}

/// Total numeric order over ratings.
pub fn compare_ratings(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Collation used for title sorting in every runtime.
///
/// Titles compare case-insensitively first. Titles that only differ by case
/// then order lowercase before uppercase at the first differing position.
/// The order does not depend on the host locale.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
}

fn case_key(c: char) -> (bool, char) {
    (c.is_uppercase(), c)
}
