use crate::catalog::{FetchError, Item, SortKey};
use crate::mvi::{Intent, RequestToken};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingIntent {
    /// Show Loading, then fetch the full catalog.
    Load,
    /// Re-fetch while keeping the current list on screen.
    Refresh,
    /// Restrict to one category, or clear with `None`.
    FilterBy { category: Option<String> },
    SortBy { sort: Option<SortKey> },
    /// Search box edited. Debounced; an empty query applies at once.
    QueryChanged { query: String },
    /// Debounce window elapsed for `query`.
    QuerySettled { query: String, token: RequestToken },
    /// Background lookup for `query` finished.
    QueryResolved {
        query: String,
        token: RequestToken,
        result: Result<Vec<Item>, FetchError>,
    },
}

impl ListingIntent {
    pub const LOAD: &'static str = "load";
    pub const REFRESH: &'static str = "refresh";
    pub const FILTER_BY: &'static str = "filter_by";
    pub const SORT_BY: &'static str = "sort_by";
    pub const QUERY_CHANGED: &'static str = "query_changed";
    pub const QUERY_SETTLED: &'static str = "query_settled";
    pub const QUERY_RESOLVED: &'static str = "query_resolved";

    pub fn filter(category: &str) -> Self {
        Self::FilterBy {
            category: Some(category.to_string()),
        }
    }

    pub fn query(query: &str) -> Self {
        Self::QueryChanged {
            query: query.to_string(),
        }
    }
}

impl Intent for ListingIntent {
    fn tag(&self) -> &'static str {
        match self {
            Self::Load => Self::LOAD,
            Self::Refresh => Self::REFRESH,
            Self::FilterBy { .. } => Self::FILTER_BY,
            Self::SortBy { .. } => Self::SORT_BY,
            Self::QueryChanged { .. } => Self::QUERY_CHANGED,
            Self::QuerySettled { .. } => Self::QUERY_SETTLED,
            Self::QueryResolved { .. } => Self::QUERY_RESOLVED,
        }
    }
}
