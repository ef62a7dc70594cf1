use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use std::thread;
use std::time::Duration;

/// Suspends the benchmark between operations.
pub trait Settle: Send + Sync {
    /// Resolves once `delay` has passed.
    fn settle(&self, delay: Duration) -> BoxFuture<'static, ()>;
}

/// Sleeps on a helper thread and completes through a oneshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Settle for ThreadSleep {
    fn settle(&self, delay: Duration) -> BoxFuture<'static, ()> {
        let (sender, receiver) = oneshot::channel::<()>();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = sender.send(());
        });
        receiver.map(|_| ()).boxed()
    }
}

/// Resolves at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl Settle for Immediate {
    fn settle(&self, _delay: Duration) -> BoxFuture<'static, ()> {
        future::ready(()).boxed()
    }
}
