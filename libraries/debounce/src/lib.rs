//! Trailing-edge debouncing for async actions.
//!
//! Every call to [`schedule`] starts a timer. If the previous timer has not fired yet it is
//! cancelled, so out of a burst of calls only the last one's action runs. Once a timer has fired
//! its action is never interrupted; superseding only silences timers that are still waiting.
//!
//! The handle is plain caller-owned state. [`Debouncer`] wraps the handle and the delay for
//! callers that don't want to thread it through by hand.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// A scheduled action. Yields the action's output through [`DebounceHandle::join`].
#[derive(Debug)]
pub struct DebounceHandle<T> {
    state: Arc<AtomicU8>,
    task: JoinHandle<Option<T>>,
}

impl<T> DebounceHandle<T> {
    /// True while the timer is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) == PENDING
    }

    /// Silence the timer if it has not fired yet. Returns whether anything was cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if cancelled {
            self.task.abort();
        }
        cancelled
    }

    /// Wait for the action to finish.
    ///
    /// Returns `None` if the timer was cancelled before it fired. A panic inside the action is
    /// resumed on the caller, the same way an `Err` returned by the action is passed through.
    pub async fn join(self) -> Option<T> {
        match self.task.await {
            Ok(output) => output,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => None,
        }
    }
}

/// Schedule `action` to run after `delay`, cancelling `pending` first if it has not fired.
///
/// The action never runs synchronously, even with a zero delay: two calls made in the same tick
/// with `Duration::ZERO` still collapse into one trailing run.
pub fn schedule<F>(
    action: F,
    delay: Duration,
    pending: Option<DebounceHandle<F::Output>>,
) -> DebounceHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    if let Some(pending) = pending {
        if pending.cancel() {
            log::debug!("Debounced action superseded before firing");
        }
    }

    let state = Arc::new(AtomicU8::new(PENDING));
    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move {
            tokio::time::sleep(delay).await;
            // cancel() may race the timer; whoever moves the state out of PENDING wins
            if state
                .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return None;
            }
            Some(action.await)
        }
    });

    DebounceHandle { state, task }
}

/// Holds the delay and the most recent handle.
///
/// Dropping a `Debouncer` cancels its pending timer.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<DebounceHandle<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let pending = self.pending.take();
        self.pending = Some(schedule(action, self.delay, pending));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(DebounceHandle::is_pending)
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|pending| pending.cancel())
    }

    /// Take the latest handle, e.g. to await it without holding a borrow of the debouncer.
    pub fn take_handle(&mut self) -> Option<DebounceHandle<T>> {
        self.pending.take()
    }

    /// Wait for the latest scheduled action, if any.
    pub async fn flush(&mut self) -> Option<T> {
        self.pending.take()?.join().await
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}
