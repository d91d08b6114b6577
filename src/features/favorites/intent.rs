use crate::catalog::ItemId;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesIntent {
    Load,
    /// Flip the favorite flag of one item, optimistically.
    Toggle { id: ItemId },
}

impl FavoritesIntent {
    pub const LOAD: &'static str = "load";
    pub const TOGGLE: &'static str = "toggle";

    pub fn toggle(id: u32) -> Self {
        Self::Toggle { id: ItemId(id) }
    }
}

impl Intent for FavoritesIntent {
    fn tag(&self) -> &'static str {
        match self {
            Self::Load => Self::LOAD,
            Self::Toggle { .. } => Self::TOGGLE,
        }
    }
}
