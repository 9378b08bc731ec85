//! Async runtime abstraction for preload sessions
//!
//! Preload sessions run in the background and may race a deadline. This
//! module abstracts spawning and timers so the preloader works on Tokio or on
//! a deterministic mock in tests.

pub mod mock;
#[cfg(feature = "runtime-tokio")]
pub mod tokio_impl;

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A boxed future that can be sent across threads
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handle to a spawned preload task
///
/// Type-erased so each runtime can keep its own native handle.
#[derive(Debug)]
pub struct JoinHandle {
    inner: Box<dyn std::any::Any + Send>,
}

impl JoinHandle {
    /// Wrap a runtime-specific handle
    pub fn new<T: Send + 'static>(handle: T) -> Self {
        Self {
            inner: Box::new(handle),
        }
    }

    /// Recover the runtime-specific handle
    pub fn downcast<T: 'static>(self) -> Option<T> {
        self.inner.downcast::<T>().ok().map(|b| *b)
    }
}

/// Async task spawner and timer source
///
/// # Example
/// ```ignore
/// let spawner = TokioSpawner::new();
/// spawner.spawn(async move {
///     session.run(display, on_complete).await;
/// });
/// ```
pub trait AsyncSpawner: Send + Sync + Clone + Debug + 'static {
    /// Spawn a background task
    fn spawn<F>(&self, task: F) -> JoinHandle
    where
        F: Future<Output = ()> + Send + 'static;

    /// A future that resolves once `duration` has elapsed
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;

    /// Get the name of this runtime (for debugging)
    fn runtime_name(&self) -> &'static str;

    /// Block on a future (if supported by the runtime)
    ///
    /// Returns None if blocking is not supported, including when the
    /// calling thread cannot be blocked.
    fn block_on<F, T>(&self, _future: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        None
    }
}

pub use mock::MockSpawner;

#[cfg(feature = "runtime-tokio")]
pub use tokio_impl::TokioSpawner;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_handle_downcast() {
        let handle = JoinHandle::new(7usize);
        assert_eq!(handle.downcast::<usize>(), Some(7));
    }

    #[test]
    fn test_join_handle_wrong_type() {
        let handle = JoinHandle::new(7usize);
        assert!(handle.downcast::<String>().is_none());
    }
}
