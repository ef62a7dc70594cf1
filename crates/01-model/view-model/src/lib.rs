#![deny(missing_docs)]
//! Canonical view-state primitives shared by both reducer runtimes.
//!
//! The `view-model` crate intentionally stays small. It defines the item
//! shape, the filter/sort criteria and their comparators, the native
//! [`ViewState`] container, the lightweight [`ViewSnapshot`] projection, the
//! [`Action`] vocabulary, and the [`ViewEngine`] seam both runtimes implement.
//! Keeping the predicates and comparators here is what lets two independent
//! engines agree on every projection.

/// Action vocabulary and its wire form.
pub mod action;
/// Filter predicates, sort keys, and the shared comparators.
pub mod criteria;
/// Engine trait, engine kinds, and the error surface of the engine seam.
pub mod engine;
/// Item values produced by item sources.
pub mod item;
/// Native view-state container and the lightweight snapshot.
pub mod state;

pub use crate::action::Action;
pub use crate::criteria::{compare_ratings, compare_titles, SortKey, SortOrder, ViewCriteria};
pub use crate::engine::{EngineError, EngineKind, EngineResult, ViewEngine};
pub use crate::item::{Item, ItemRef, Tags};
pub use crate::state::{
    max_page, page_range, total_pages, ViewSnapshot, ViewState, DEFAULT_ITEMS_PER_PAGE,
};
