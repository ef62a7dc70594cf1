#![deny(missing_docs)]
//! Sandboxed reducer runtime.
//!
//! The store lives on a dedicated worker thread and is reachable only through
//! encoded [`Request`]/[`Reply`] frames. Callers never see the store itself:
//! [`SandboxLoader`] boots the worker once, [`SandboxModule`] is the calling
//! capability it yields, and [`SandboxReducer`] maps every view operation onto
//! one round trip.
//!
//! The store keeps an index projection over its items. Paging and view reads
//! touch only the indices, and every reply is marshalled, so each operation
//! carries the cost of crossing a foreign boundary.

mod client;
/// Frame envelope and JSON codec.
pub mod codec;
mod loader;
mod module;
/// Request and reply vocabulary.
pub mod protocol;
mod store;
mod worker;

pub use client::SandboxReducer;
pub use codec::{Envelope, Frame, SandboxCodec};
pub use loader::{BootHook, LoadFuture, LoadStatus, SandboxLoader};
pub use module::SandboxModule;
pub use protocol::{Reply, Request};
pub use worker::WORKER_THREAD_NAME;
