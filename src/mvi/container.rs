//! Event queue, dispatcher loop and the container handle.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::emitter::{Emitter, SnapshotStream};
use super::error::HandlerError;
use super::handler::{Feature, HandlerContext, HandlerRegistry};
use super::intent::Intent;
use super::state::UiState;

enum Envelope<I> {
    Intent(I),
    /// Answered once everything queued before it has been handled.
    Barrier(oneshot::Sender<()>),
}

/// Cloneable handle that appends intents to one container's queue.
///
/// After the container is closed every `dispatch` is a silent no-op.
pub struct Dispatcher<I> {
    tx: mpsc::UnboundedSender<Envelope<I>>,
    closed: Arc<AtomicBool>,
}

impl<I> Clone for Dispatcher<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<I: Intent> Dispatcher<I> {
    fn channel() -> (Self, mpsc::UnboundedReceiver<Envelope<I>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        };
        (dispatcher, rx)
    }

    /// Queues `intent`. Returns `false` if the container is closed.
    pub fn dispatch(&self, intent: I) -> bool {
        if self.is_closed() {
            tracing::trace!(tag = intent.tag(), "Dispatch after close ignored");
            return false;
        }
        self.tx.send(Envelope::Intent(intent)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst) || self.tx.is_closed()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// One running instance of a feature.
///
/// Intents are handled strictly one at a time in arrival order: the next
/// handler starts only after the previous one has returned, so emissions
/// of two intents never interleave. Different containers share nothing
/// and run independently.
pub struct Container<F: Feature> {
    name: &'static str,
    emitter: Emitter<F::State>,
    dispatcher: Dispatcher<F::Intent>,
    task: JoinHandle<()>,
}

impl<F: Feature> Container<F> {
    /// Starts a container on the current tokio runtime.
    pub fn spawn(feature: F) -> Self {
        let name = feature.name();
        let emitter = Emitter::new(feature.initial_state());
        let (dispatcher, rx) = Dispatcher::channel();
        let registry = HandlerRegistry::<F>::for_feature();
        tracing::debug!(feature = name, tags = ?registry.tags(), "Container started");

        let task = tokio::spawn(run_dispatcher(
            feature,
            registry,
            rx,
            emitter.clone(),
            dispatcher.clone(),
        ));

        Self {
            name,
            emitter,
            dispatcher,
            task,
        }
    }

    /// Queues an intent and returns immediately.
    pub fn dispatch(&self, intent: F::Intent) {
        self.dispatcher.dispatch(intent);
    }

    /// Handle for dispatching from elsewhere (e.g. another task).
    pub fn dispatcher(&self) -> Dispatcher<F::Intent> {
        self.dispatcher.clone()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn observe(&self) -> SnapshotStream<F::State> {
        self.emitter.subscribe()
    }

    /// Latest committed snapshot, for rendering before subscribing.
    pub fn current_snapshot(&self) -> F::State {
        self.emitter.current()
    }

    /// Waits until every intent dispatched before this call has been
    /// handled. Returns immediately on a closed container.
    pub async fn settled(&self) {
        if self.dispatcher.is_closed() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        if self.dispatcher.tx.send(Envelope::Barrier(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Releases the container. Queued intents and pending timers are
    /// discarded without emission. Idempotent.
    pub fn close(&self) {
        if self.emitter.is_closed() {
            return;
        }
        tracing::debug!(feature = self.name, "Container closed");
        self.dispatcher.close();
        self.emitter.close();
        self.task.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.emitter.is_closed()
    }
}

impl<F: Feature> Drop for Container<F> {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_dispatcher<F: Feature>(
    mut feature: F,
    registry: HandlerRegistry<F>,
    mut rx: mpsc::UnboundedReceiver<Envelope<F::Intent>>,
    emitter: Emitter<F::State>,
    dispatcher: Dispatcher<F::Intent>,
) {
    let name = feature.name();
    while let Some(envelope) = rx.recv().await {
        if emitter.is_closed() {
            break;
        }
        let intent = match envelope {
            Envelope::Intent(intent) => intent,
            Envelope::Barrier(done) => {
                let _ = done.send(());
                continue;
            }
        };

        let tag = intent.tag();
        let Some(handler) = registry.resolve(tag) else {
            tracing::warn!(feature = name, tag, "No handler registered, intent dropped");
            continue;
        };

        tracing::debug!(feature = name, tag, "Handling intent");
        let context = HandlerContext::new(emitter.clone(), dispatcher.clone());
        let outcome = AssertUnwindSafe(handler(&mut feature, intent, context))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(HandlerError::Unexpected(panic_message(&*panic))));

        if let Err(err) = outcome {
            report_failure(name, tag, &emitter, err);
        }
    }
    tracing::trace!(feature = name, "Dispatcher stopped");
}

fn report_failure<S: UiState>(feature: &str, tag: &str, emitter: &Emitter<S>, err: HandlerError) {
    match S::error(err.to_string()) {
        Some(snapshot) => {
            tracing::warn!(feature, tag, kind = err.kind(), error = %err, "Handler failed");
            emitter.emit(snapshot);
        }
        None => {
            tracing::error!(feature, tag, kind = err.kind(), error = %err, "Handler failed with no error state to show");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
