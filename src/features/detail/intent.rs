use crate::catalog::ItemId;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailIntent {
    /// Load one item, then its related items.
    Load { id: ItemId },
    /// Re-fetch only the related-items sidebar.
    RefreshRelated,
}

impl DetailIntent {
    pub const LOAD: &'static str = "load";
    pub const REFRESH_RELATED: &'static str = "refresh_related";
}

impl Intent for DetailIntent {
    fn tag(&self) -> &'static str {
        match self {
            Self::Load { .. } => Self::LOAD,
            Self::RefreshRelated => Self::REFRESH_RELATED,
        }
    }
}
