//! Error types for the catalog data source.

use thiserror::Error;

use super::model::ItemId;

/// A read against the data source failed. Retryable by re-dispatching the
/// intent that triggered the load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Catalog is unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Item {id} not found")]
    NotFound { id: ItemId },
}

/// A write against the data source failed. Triggers rollback of the
/// optimistic snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("Could not update item {id}: {reason}")]
    Rejected { id: ItemId, reason: String },

    #[error("Item {id} not found")]
    NotFound { id: ItemId },
}

/// Input rejected before it reached the data source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Display name must not be empty")]
    EmptyName,

    #[error("Display name is too long ({len} characters, max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown item {0}")]
    UnknownItem(ItemId),
}
