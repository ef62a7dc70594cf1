#![deny(missing_docs)]
//! Benchmark orchestration and the interactive session facade.
//!
//! [`Orchestrator`] runs the fixed operation menu against the native and the
//! sandboxed reducer and reports per-operation statistics and speedups.
//! [`Session`] owns both engines, the sandbox loader, and dispatch metrics,
//! and exposes the commands a front end drives.

mod config;
mod guard;
mod ops;
mod orchestrator;
mod session;
mod settle;

pub use config::{BenchConfig, DataSize, SessionConfig, DEFAULT_ITERATIONS, DEFAULT_SETTLE_DELAY};
pub use guard::{RunFlag, RunTicket};
pub use ops::{BenchOp, BENCH_TAG};
pub use orchestrator::{replay, BenchmarkOutcome, OperationResult, Orchestrator, Refusal};
pub use session::{LoadReport, Presentation, Session};
pub use settle::{Immediate, Settle, ThreadSleep};
