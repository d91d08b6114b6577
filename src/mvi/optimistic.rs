//! Optimistic update with exact rollback.

use std::future::Future;

use crate::catalog::ItemId;

use super::emitter::Emitter;
use super::state::UiState;

/// An in-flight mutation: the entity it targets and the snapshot that was
/// current before the optimistic emission.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOperation<S> {
    pub entity_id: ItemId,
    pub prior: S,
}

/// Guard for one optimistic mutation.
///
/// Created by [`begin`](OptimisticUpdate::begin), which emits the expected
/// snapshot right away. Must be finished with either
/// [`commit`](OptimisticUpdate::commit) or
/// [`rollback`](OptimisticUpdate::rollback).
#[must_use = "an optimistic update must be committed or rolled back"]
pub struct OptimisticUpdate<S: UiState> {
    emitter: Emitter<S>,
    pending: PendingOperation<S>,
}

impl<S: UiState> OptimisticUpdate<S> {
    pub fn begin(
        emitter: &Emitter<S>,
        entity_id: ItemId,
        prior: S,
        apply_optimistic: impl FnOnce(&S) -> S,
    ) -> Self {
        let optimistic = apply_optimistic(&prior);
        emitter.emit(optimistic);
        tracing::debug!(entity_id = %entity_id, "Optimistic snapshot emitted");
        Self {
            emitter: emitter.clone(),
            pending: PendingOperation { entity_id, prior },
        }
    }

    pub fn pending(&self) -> &PendingOperation<S> {
        &self.pending
    }

    /// Replaces the optimistic snapshot with the authoritative one.
    pub fn commit(self, confirmed: S) {
        tracing::debug!(entity_id = %self.pending.entity_id, "Optimistic update confirmed");
        self.emitter.emit(confirmed);
    }

    /// Emits `error`, then restores the exact prior snapshot.
    pub fn rollback(self, error: S) {
        tracing::debug!(entity_id = %self.pending.entity_id, "Optimistic update rolled back");
        self.emitter.emit(error);
        self.emitter.emit(self.pending.prior);
    }
}

/// Runs a full optimistic cycle.
///
/// Emits `apply_optimistic(prior)`, awaits `mutation`, then emits either
/// `commit_on_success(output)` or `compensate_on_failure(error)` followed
/// by `prior`. Returns the confirmed snapshot, or the mutation error after
/// the rollback has been emitted.
pub async fn run_optimistic<S, T, E, M, C, CF, R>(
    emitter: &Emitter<S>,
    entity_id: ItemId,
    prior: S,
    apply_optimistic: impl FnOnce(&S) -> S,
    mutation: M,
    commit_on_success: C,
    compensate_on_failure: R,
) -> Result<S, E>
where
    S: UiState,
    M: Future<Output = Result<T, E>>,
    C: FnOnce(T) -> CF,
    CF: Future<Output = S>,
    R: FnOnce(&E) -> S,
{
    let update = OptimisticUpdate::begin(emitter, entity_id, prior, apply_optimistic);
    match mutation.await {
        Ok(output) => {
            let confirmed = commit_on_success(output).await;
            update.commit(confirmed.clone());
            Ok(confirmed)
        }
        Err(err) => {
            update.rollback(compensate_on_failure(&err));
            Err(err)
        }
    }
}
