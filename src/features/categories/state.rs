use serde::Serialize;

use crate::catalog::Item;
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CategoriesState {
    #[default]
    Initial,
    Loading,
    Loaded {
        /// Distinct categories, alphabetical.
        categories: Vec<String>,
        selected: Option<String>,
        /// Items of the selected category; empty without a selection.
        items: Vec<Item>,
        /// Promoted items shown above the category list.
        featured: Vec<Item>,
    },
    Error {
        message: String,
    },
}

impl UiState for CategoriesState {
    fn error(message: String) -> Option<Self> {
        Some(Self::Error { message })
    }
}

impl CategoriesState {
    pub fn categories(&self) -> &[String] {
        match self {
            Self::Loaded { categories, .. } => categories,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Loaded { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }
}
