use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Item, ItemId};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FavoritesState {
    #[default]
    Initial,
    Loading,
    Loaded {
        items: Vec<Item>,
        favorites: BTreeSet<ItemId>,
    },
    /// A toggle is in flight; `favorites` is the expected result.
    Pending {
        entity_id: ItemId,
        /// Expected flag of `entity_id` once the toggle lands.
        favorite: bool,
        favorites: BTreeSet<ItemId>,
    },
    Error {
        message: String,
    },
}

impl UiState for FavoritesState {
    fn error(message: String) -> Option<Self> {
        Some(Self::Error { message })
    }
}

impl FavoritesState {
    /// Loaded snapshot for a freshly fetched collection.
    pub fn from_items(items: Vec<Item>) -> Self {
        let favorites = items
            .iter()
            .filter(|item| item.favorite)
            .map(|item| item.id)
            .collect();
        Self::Loaded { items, favorites }
    }

    pub fn favorites(&self) -> Option<&BTreeSet<ItemId>> {
        match self {
            Self::Loaded { favorites, .. } | Self::Pending { favorites, .. } => Some(favorites),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_items_collects_flagged_ids() {
        let state = FavoritesState::from_items(vec![
            Item::new(1, "One", "Action", 1.0),
            Item::new(2, "Two", "Action", 2.0).favorited(),
        ]);
        let expected: BTreeSet<_> = [ItemId(2)].into_iter().collect();
        assert_eq!(state.favorites(), Some(&expected));
        assert!(!state.is_pending());
    }
}
