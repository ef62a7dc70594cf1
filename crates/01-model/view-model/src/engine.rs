//! The seam both reducer runtimes implement.

use crate::action::Action;
use crate::item::ItemRef;
use crate::state::ViewSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias for engine calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by reducer engines.
///
/// `Clone` so a failed load can be cached and reported to every later caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No module is attached.
    #[error("sandboxed module not loaded")]
    NotLoaded,

    /// Acquiring the module failed; the reason is kept for every caller.
    #[error("sandboxed module failed to load: {0}")]
    LoadFailure(String),

    /// The worker hung up mid-call.
    #[error("sandboxed module disconnected")]
    Disconnected,

    /// A frame could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// The worker answered with the wrong reply kind.
    #[error("protocol violation: {0}")]
    Protocol(&'static str),

    /// The worker refused a well-formed request.
    #[error("sandbox rejected request: {0}")]
    Sandbox(String),
}

impl EngineError {
    /// Wraps a serializer message as [`EngineError::Codec`].
    pub fn codec(msg: impl Into<String>) -> Self {
        EngineError::Codec(msg.into())
    }
}

/// Which runtime hosts a reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Pure value reducer running in-process.
    #[default]
    Native,
    /// Reducer behind the sandbox protocol boundary.
    Sandboxed,
}

impl EngineKind {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Native => "native",
            EngineKind::Sandboxed => "sandboxed",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform driving surface over both reducer runtimes.
///
/// Conformance tests run the same action sequences through every
/// implementation and compare what this trait reports.
pub trait ViewEngine {
    /// Runtime hosting this engine.
    fn kind(&self) -> EngineKind;

    /// Applies one transition and reports the resulting view.
    fn dispatch(&mut self, action: &Action) -> EngineResult<ViewSnapshot>;

    /// Reports the current view without changing it.
    fn view(&self) -> EngineResult<ViewSnapshot>;

    /// Items on the current page, in projection order.
    fn page_items(&self) -> EngineResult<Vec<ItemRef>>;
}
