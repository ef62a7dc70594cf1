use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks a benchmark run as in progress.
#[derive(Clone, Debug, Default)]
pub struct RunFlag {
    running: Arc<AtomicBool>,
}

impl RunFlag {
    /// Creates a cleared flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or `None` if a run already holds it.
    pub fn try_start(&self) -> Option<RunTicket> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunTicket {
                running: Arc::clone(&self.running),
            })
    }

    /// True while a ticket is alive.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Clears the flag on drop.
#[derive(Debug)]
pub struct RunTicket {
    running: Arc<AtomicBool>,
}

impl Drop for RunTicket {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
