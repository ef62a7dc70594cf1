//! One-shot, memoized acquisition of the sandbox module.

use crate::codec::Frame;
use crate::module::SandboxModule;
use crate::worker::{self, WORKER_THREAD_NAME};
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{error, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use view_model::{EngineError, EngineResult};

/// Hook run on the worker thread before it starts serving.
///
/// Returning `Err` fails the load with [`EngineError::LoadFailure`].
pub type BootHook = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// Shared handle to the in-flight or settled acquisition.
pub type LoadFuture = Shared<BoxFuture<'static, EngineResult<SandboxModule>>>;

/// Observable state of the acquisition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// `load` has never been called.
    Idle,
    /// Acquisition started but has not been observed to finish.
    Pending,
    /// The module is available.
    Ready,
    /// Acquisition failed; the failure is final.
    Failed(EngineError),
}

/// Starts the sandbox worker at most once and hands every caller the same acquisition.
///
/// A failed acquisition is cached like a successful one and never retried.
pub struct SandboxLoader {
    boot: BootHook,
    acquisition: Mutex<Option<LoadFuture>>,
}

impl SandboxLoader {
    /// Creates a loader whose worker boots unconditionally.
    pub fn new() -> Self {
        Self::with_boot(|| Ok(()))
    }

    /// Creates a loader that runs `boot` on the worker before serving.
    pub fn with_boot<F>(boot: F) -> Self
    where
        F: Fn() -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            boot: Arc::new(boot),
            acquisition: Mutex::new(None),
        }
    }

    /// Returns the shared acquisition, starting it on first use.
    pub fn load(&self) -> LoadFuture {
        let mut slot = self.acquisition.lock();
        slot.get_or_insert_with(|| acquire(Arc::clone(&self.boot)).shared())
            .clone()
    }

    /// Reports how far the acquisition has progressed.
    pub fn status(&self) -> LoadStatus {
        let slot = self.acquisition.lock();
        match slot.as_ref().map(Shared::peek) {
            None => LoadStatus::Idle,
            Some(None) => LoadStatus::Pending,
            Some(Some(Ok(_))) => LoadStatus::Ready,
            Some(Some(Err(err))) => LoadStatus::Failed(err.clone()),
        }
    }
}

impl Default for SandboxLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn acquire(boot: BootHook) -> BoxFuture<'static, EngineResult<SandboxModule>> {
    let (ready_tx, ready_rx) = oneshot::channel::<Result<(), String>>();
    let (request_tx, request_rx) = crossbeam_channel::unbounded::<Frame>();
    let (reply_tx, reply_rx) = crossbeam_channel::unbounded::<Frame>();

    let spawned = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || match boot() {
            Ok(()) => {
                if ready_tx.send(Ok(())).is_ok() {
                    worker::serve(request_rx, reply_tx);
                }
            }
            Err(reason) => {
                let _ = ready_tx.send(Err(reason));
            }
        });

    async move {
        let worker = spawned.map_err(|err| {
            EngineError::LoadFailure(format!("spawn {WORKER_THREAD_NAME}: {err}"))
        })?;
        let outcome = match ready_rx.await {
            Ok(Ok(())) => Ok(SandboxModule::new(request_tx, reply_rx, worker)),
            Ok(Err(reason)) => {
                let _ = worker.join();
                Err(EngineError::LoadFailure(reason))
            }
            Err(oneshot::Canceled) => {
                let _ = worker.join();
                Err(EngineError::LoadFailure(
                    "sandbox worker exited during boot".to_string(),
                ))
            }
        };
        match &outcome {
            Ok(_) => info!("sandbox module loaded"),
            Err(err) => error!("{err}"),
        }
        outcome
    }
    .boxed()
}
