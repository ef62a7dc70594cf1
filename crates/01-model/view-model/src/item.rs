//! Item values produced by item sources and shared by both runtimes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Inline storage for an item's tags; generated items carry one to three.
pub type Tags = SmallVec<[String; 4]>;

/// Shared handle to an immutable item.
pub type ItemRef = Arc<Item>;

/// Immutable catalogue entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Display title, compared with [`crate::compare_titles`].
    pub title: String,
    /// Tag set; membership is all that matters when filtering.
    pub tags: Tags,
    /// Rating in `[1.0, 5.0]`.
    pub rating: f64,
    /// Whether the item can be played.
    pub is_playable: bool,
}

impl Item {
    /// Returns true when the item carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Wraps the item in a shared handle.
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}
