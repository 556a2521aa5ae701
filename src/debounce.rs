//! Delay-and-collapse over a changing value
//!
//! Each new input schedules a delayed adoption and cancels the adoption
//! still pending from the previous input. Dropping the debouncer cancels
//! whatever is pending; nothing is adopted after teardown.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A value that trails its input by `delay`, adopting only the last input
/// of a burst.
///
/// Must be used from within a tokio runtime: pending adoptions run as
/// spawned timer tasks.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    adopted: Arc<watch::Sender<T>>,
    observed: watch::Receiver<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (adopted, observed) = watch::channel(initial);
        Self {
            delay,
            adopted: Arc::new(adopted),
            observed,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Feed a new input value. Discards any adoption still waiting.
    pub fn set(&mut self, value: T) {
        self.cancel_pending();
        let adopted = self.adopted.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            adopted.send_replace(value);
        }));
    }

    /// Adopt `value` immediately, discarding any pending input. Does not
    /// wake `adopted()`.
    pub fn set_now(&mut self, value: T) {
        self.cancel_pending();
        self.adopted.send_replace(value);
        self.observed.borrow_and_update();
    }

    /// The currently adopted value.
    pub fn get(&self) -> T {
        self.adopted.borrow().clone()
    }

    /// Whether an input is still waiting out its delay.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether a value was adopted that `adopted()` has not yet returned.
    pub fn has_unobserved(&self) -> bool {
        self.observed.has_changed().unwrap_or(false)
    }

    /// Resolves once a value has been adopted since the last call.
    pub async fn adopted(&mut self) -> T {
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = self.observed.changed().await;
        self.observed.borrow_and_update().clone()
    }

    /// A receiver observing adopted values, independent of `adopted()`.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.adopted.subscribe()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
