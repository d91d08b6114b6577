//! Features, handler contexts and the tag-keyed handler registry.

use std::collections::HashMap;

use futures::future::BoxFuture;

use super::container::Dispatcher;
use super::emitter::Emitter;
use super::error::HandlerError;
use super::intent::Intent;
use super::state::UiState;

/// Future returned by a handler. Borrows the feature for its duration.
pub type HandlerFuture<'a> = BoxFuture<'a, Result<(), HandlerError>>;

/// Asynchronous routine bound to one intent tag.
pub type Handler<F> =
    for<'a> fn(&'a mut F, <F as Feature>::Intent, HandlerContext<F>) -> HandlerFuture<'a>;

/// One screen's worth of state-management logic.
///
/// The feature value holds everything a container needs between intents
/// (base collection cache, debouncer, remembered view triple). It is owned
/// by the container's dispatcher task and only ever touched by one
/// handler at a time.
pub trait Feature: Send + Sized + 'static {
    type State: UiState;
    type Intent: Intent;

    /// Name used in log fields.
    fn name(&self) -> &'static str;

    /// Snapshot a fresh container starts from.
    fn initial_state(&self) -> Self::State;

    /// Binds every intent tag to its handler.
    fn register(registry: &mut HandlerRegistry<Self>);
}

/// Everything a handler may touch besides its feature.
pub struct HandlerContext<F: Feature> {
    current: F::State,
    emitter: Emitter<F::State>,
    dispatcher: Dispatcher<F::Intent>,
}

impl<F: Feature> HandlerContext<F> {
    pub(crate) fn new(emitter: Emitter<F::State>, dispatcher: Dispatcher<F::Intent>) -> Self {
        Self {
            current: emitter.current(),
            emitter,
            dispatcher,
        }
    }

    /// Snapshot that was current when the handler started.
    pub fn current(&self) -> &F::State {
        &self.current
    }

    /// Snapshot that is current right now, including this handler's own
    /// emissions.
    pub fn latest(&self) -> F::State {
        self.emitter.current()
    }

    pub fn emit(&self, snapshot: F::State) {
        self.emitter.emit(snapshot);
    }

    /// Surfaces `err` as a one-shot error snapshot, then restores the
    /// snapshot the handler started from.
    ///
    /// Used for input rejected before it reaches the data source. Features
    /// without an error state only log the rejection.
    pub fn reject(&self, err: impl Into<HandlerError>) {
        let err = err.into();
        tracing::info!(kind = err.kind(), error = %err, "Intent rejected");
        if let Some(snapshot) = F::State::error(err.to_string()) {
            self.emit(snapshot);
            self.emit(self.current.clone());
        }
    }

    pub fn emitter(&self) -> &Emitter<F::State> {
        &self.emitter
    }

    /// Handle for queueing follow-up intents on the same container.
    pub fn dispatcher(&self) -> &Dispatcher<F::Intent> {
        &self.dispatcher
    }
}

/// Maps intent tags to handlers, one registry per container.
pub struct HandlerRegistry<F: Feature> {
    handlers: HashMap<&'static str, Handler<F>>,
}

impl<F: Feature> Default for HandlerRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Feature> HandlerRegistry<F> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Builds the registry a feature declares.
    pub fn for_feature() -> Self {
        let mut registry = Self::new();
        F::register(&mut registry);
        registry
    }

    /// Binds `tag` to `handler`, replacing any previous binding.
    pub fn on(&mut self, tag: &'static str, handler: Handler<F>) -> &mut Self {
        if self.handlers.insert(tag, handler).is_some() {
            tracing::warn!(tag, "Handler registered twice, keeping the latest");
        }
        self
    }

    pub fn resolve(&self, tag: &str) -> Option<Handler<F>> {
        self.handlers.get(tag).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.handlers.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}
