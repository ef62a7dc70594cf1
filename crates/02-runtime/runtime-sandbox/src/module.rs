//! Handle to a running sandbox worker.

use crate::codec::{Frame, SandboxCodec};
use crate::protocol::{Reply, Request};
use crossbeam_channel::{Receiver, Sender};
use log::error;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use view_model::{EngineError, EngineResult};

/// Capability to call into a loaded sandbox.
///
/// Clones share one worker. The worker is shut down and joined when the last
/// clone is dropped.
#[derive(Clone)]
pub struct SandboxModule {
    inner: Arc<ModuleInner>,
}

struct ModuleInner {
    link: Mutex<Link>,
    codec: SandboxCodec,
    worker: Mutex<Option<JoinHandle<()>>>,
}

struct Link {
    requests: Sender<Frame>,
    replies: Receiver<Frame>,
}

impl SandboxModule {
    pub(crate) fn new(
        requests: Sender<Frame>,
        replies: Receiver<Frame>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            inner: Arc::new(ModuleInner {
                link: Mutex::new(Link { requests, replies }),
                codec: SandboxCodec,
                worker: Mutex::new(Some(worker)),
            }),
        }
    }

    /// Performs one request/reply round trip.
    ///
    /// The link stays locked for the whole round trip so replies always pair
    /// with their request.
    pub fn call(&self, request: &Request) -> EngineResult<Reply> {
        let frame = self.inner.codec.encode_request(request)?;
        let reply = {
            let link = self.inner.link.lock();
            link.requests
                .send(frame)
                .map_err(|_| EngineError::Disconnected)?;
            link.replies.recv().map_err(|_| EngineError::Disconnected)?
        };
        match self.inner.codec.decode_reply(&reply)? {
            Reply::Fault(reason) => Err(EngineError::Sandbox(reason)),
            reply => Ok(reply),
        }
    }
}

impl fmt::Debug for SandboxModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxModule").finish_non_exhaustive()
    }
}

impl Drop for ModuleInner {
    fn drop(&mut self) {
        if let Ok(frame) = self.codec.encode_request(&Request::Shutdown) {
            let _ = self.link.get_mut().requests.send(frame);
        }
        if let Some(worker) = self.worker.get_mut().take() {
            if worker.join().is_err() {
                error!("sandbox worker panicked");
            }
        }
    }
}
