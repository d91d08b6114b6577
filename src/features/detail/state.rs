use serde::Serialize;

use crate::catalog::Item;
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    #[default]
    Initial,
    Loading,
    Loaded {
        item: Item,
        /// Other items of the same category, best score first. Empty until
        /// the secondary fetch lands, and left as is if it fails.
        related: Vec<Item>,
    },
    Error {
        message: String,
    },
}

impl UiState for DetailState {
    fn error(message: String) -> Option<Self> {
        Some(Self::Error { message })
    }
}

impl DetailState {
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Loaded { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn related(&self) -> &[Item] {
        match self {
            Self::Loaded { related, .. } => related,
            _ => &[],
        }
    }
}
