//! Errors a handler can return to the dispatcher.

use thiserror::Error;

use crate::catalog::{FetchError, MutationError, ValidationError};

/// Failure of one handler invocation.
///
/// The dispatcher converts these into the feature's error snapshot (see
/// [`UiState::error`](super::UiState::error)) and moves on to the next
/// queued intent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// Anything the handler did not anticipate, including panics caught at
    /// the dispatcher boundary.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl HandlerError {
    /// A handler was handed an intent it was not registered for.
    pub fn unexpected_intent(tag: &str) -> Self {
        HandlerError::Unexpected(format!("handler cannot process intent '{tag}'"))
    }

    /// Short classification for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::Fetch(_) => "fetch",
            HandlerError::Validation(_) => "validation",
            HandlerError::Mutation(_) => "mutation",
            HandlerError::Unexpected(_) => "unexpected",
        }
    }
}
