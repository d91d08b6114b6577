//! Debounce timer with last-request-wins tokens.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::container::Dispatcher;
use super::intent::Intent;

/// Monotonically increasing id of one debounced request.
pub type RequestToken = u64;

/// Coalesces bursts of input into one trigger per quiet window.
///
/// Each [`schedule`](Debouncer::schedule) cancels the previous timer if it
/// has not fired yet and issues a fresh token. Work started by an older
/// token is never interrupted, but its result is recognisably stale:
/// [`is_current`](Debouncer::is_current) only accepts the newest token.
pub struct Debouncer {
    window: Duration,
    latest: RequestToken,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            latest: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the quiet window. When it elapses, `make(token)` is
    /// dispatched to the owning container.
    pub fn schedule<I, M>(&mut self, dispatcher: &Dispatcher<I>, make: M) -> RequestToken
    where
        I: Intent,
        M: FnOnce(RequestToken) -> I + Send + 'static,
    {
        self.cancel_pending();
        let token = self.issue();
        let dispatcher = dispatcher.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            tracing::trace!(token, "Debounce window elapsed");
            dispatcher.dispatch(make(token));
        }));
        token
    }

    /// Drops any pending trigger and invalidates every outstanding token.
    pub fn reset(&mut self) -> RequestToken {
        self.cancel_pending();
        self.issue()
    }

    pub fn latest(&self) -> RequestToken {
        self.latest
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token == self.latest
    }

    /// True while a timer is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        self.latest
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                tracing::trace!(token = self.latest, "Pending debounce cancelled");
                handle.abort();
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
