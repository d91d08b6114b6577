use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesIntent {
    Load,
    Select { category: String },
    ClearSelection,
}

impl CategoriesIntent {
    pub const LOAD: &'static str = "load";
    pub const SELECT: &'static str = "select";
    pub const CLEAR_SELECTION: &'static str = "clear_selection";

    pub fn select(category: &str) -> Self {
        Self::Select {
            category: category.to_string(),
        }
    }
}

impl Intent for CategoriesIntent {
    fn tag(&self) -> &'static str {
        match self {
            Self::Load => Self::LOAD,
            Self::Select { .. } => Self::SELECT,
            Self::ClearSelection => Self::CLEAR_SELECTION,
        }
    }
}
