//! Snapshot hub: the current snapshot plus its live subscribers.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::state::UiState;

struct Hub<S> {
    current: S,
    subscribers: Vec<mpsc::UnboundedSender<S>>,
    closed: bool,
}

/// Emit capability bound to one container.
///
/// Every clone shares the same hub. `emit` replaces the current snapshot
/// and pushes it to every subscriber before returning, so emissions are
/// observed in exactly the order they were made.
pub struct Emitter<S> {
    hub: Arc<Mutex<Hub<S>>>,
}

impl<S> Clone for Emitter<S> {
    fn clone(&self) -> Self {
        Self {
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<S: UiState> Emitter<S> {
    pub fn new(initial: S) -> Self {
        Self {
            hub: Arc::new(Mutex::new(Hub {
                current: initial,
                subscribers: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Commits `snapshot` as current and notifies subscribers.
    ///
    /// Returns `false` (and drops the snapshot) once the hub is closed.
    pub fn emit(&self, snapshot: S) -> bool {
        let mut hub = self.hub.lock();
        if hub.closed {
            tracing::trace!("Emit after close ignored");
            return false;
        }
        hub.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
        hub.current = snapshot;
        true
    }

    /// The latest committed snapshot.
    pub fn current(&self) -> S {
        self.hub.lock().current.clone()
    }

    /// Subscribes to future snapshots, starting with the current one.
    ///
    /// On a closed hub the stream yields the last snapshot and then ends.
    pub fn subscribe(&self) -> SnapshotStream<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut hub = self.hub.lock();
        // Replay and registration happen under one lock so no emit can
        // slip in between them.
        let _ = tx.send(hub.current.clone());
        if !hub.closed {
            hub.subscribers.push(tx);
        }
        SnapshotStream { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut hub = self.hub.lock();
        hub.subscribers.retain(|subscriber| !subscriber.is_closed());
        hub.subscribers.len()
    }

    /// Stops accepting emissions and ends every stream. Idempotent.
    pub fn close(&self) {
        let mut hub = self.hub.lock();
        hub.closed = true;
        hub.subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.hub.lock().closed
    }
}

/// Stream of committed snapshots for one subscriber.
///
/// Yields the snapshot current at subscription time, then every later
/// emission. Ends when the container is closed.
pub struct SnapshotStream<S> {
    rx: mpsc::UnboundedReceiver<S>,
}

impl<S> SnapshotStream<S> {
    /// Waits for the next snapshot.
    pub async fn next(&mut self) -> Option<S> {
        self.rx.recv().await
    }

    /// Returns an already delivered snapshot without waiting.
    pub fn try_next(&mut self) -> Option<S> {
        self.rx.try_recv().ok()
    }

    /// Drains every snapshot delivered so far.
    pub fn drain(&mut self) -> Vec<S> {
        let mut out = Vec::new();
        while let Ok(snapshot) = self.rx.try_recv() {
            out.push(snapshot);
        }
        out
    }
}

impl<S> Stream for SnapshotStream<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.rx.poll_recv(cx)
    }
}
