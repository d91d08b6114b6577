//! Snapshots of the catalog listing screen.

use serde::Serialize;

use crate::catalog::{Item, ItemId, SortKey};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingState {
    #[default]
    Initial,
    Loading,
    /// Visible list together with the triple it was derived from.
    Loaded {
        items: Vec<Item>,
        filter: Option<String>,
        sort: Option<SortKey>,
        query: String,
    },
    Error {
        message: String,
    },
}

impl UiState for ListingState {
    fn error(message: String) -> Option<Self> {
        Some(Self::Error { message })
    }
}

impl ListingState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Visible items; empty unless loaded.
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Loaded { items, .. } => items,
            _ => &[],
        }
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items().iter().map(|item| item.id).collect()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}
