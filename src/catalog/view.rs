//! Derived views over a base collection.
//!
//! A view is never stored on its own: it is recomputed from the base
//! collection and the `(filter, query, sort)` triple every time one of
//! them changes. [`derive_view`] is pure, so the same inputs always yield
//! the same list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::model::Item;

/// Ordering applied to a view. `None` on [`ViewQuery::sort`] keeps catalog
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Title, ascending.
    Alphabetical,
    /// Score, descending. Ties keep catalog order.
    Score,
    /// Newest (highest id) first.
    Recency,
    /// Featured items first, each group by score descending.
    Promoted,
}

impl SortKey {
    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Alphabetical => a.title.cmp(&b.title),
            SortKey::Score => b.score.total_cmp(&a.score),
            SortKey::Recency => b.id.cmp(&a.id),
            SortKey::Promoted => b
                .featured
                .cmp(&a.featured)
                .then_with(|| b.score.total_cmp(&a.score)),
        }
    }
}

/// The triple a view is derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewQuery {
    /// Exact category match; `None` keeps every item.
    pub filter: Option<String>,
    /// Case-insensitive substring over title and description; empty keeps
    /// every item.
    pub query: String,
    pub sort: Option<SortKey>,
}

impl ViewQuery {
    pub fn with_filter(&self, filter: Option<String>) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<SortKey>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }
}

/// True when `item` matches a free-text query.
pub fn matches_query(item: &Item, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(&needle)
        || item.description.to_lowercase().contains(&needle)
}

/// Computes the visible list for `view` over `base`.
pub fn derive_view(base: &[Item], view: &ViewQuery) -> Vec<Item> {
    let mut items: Vec<Item> = base
        .iter()
        .filter(|item| match &view.filter {
            Some(category) => &item.category == category,
            None => true,
        })
        .filter(|item| matches_query(item, &view.query))
        .cloned()
        .collect();

    if let Some(sort) = view.sort {
        // sort_by is stable, which the score ordering relies on for ties.
        items.sort_by(|a, b| sort.compare(a, b));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemId;

    fn base() -> Vec<Item> {
        vec![
            Item::new(1, "Heat Run", "Action", 8.5).featured(),
            Item::new(2, "Paper Moons", "Comedy", 7.9).with_description("Rival magicians"),
            Item::new(3, "Also Ran", "Comedy", 7.9),
            Item::new(4, "Zero Hour", "Action", 9.0),
        ]
    }

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn empty_triple_is_identity() {
        let view = derive_view(&base(), &ViewQuery::default());
        assert_eq!(view, base());
    }

    #[test]
    fn filter_matches_category_exactly() {
        let view = ViewQuery::default().with_filter(Some("Comedy".into()));
        assert_eq!(ids(&derive_view(&base(), &view)), vec![2, 3]);
    }

    #[test]
    fn query_is_case_insensitive_over_title_and_description() {
        let view = ViewQuery::default().with_query("MAGIC");
        assert_eq!(ids(&derive_view(&base(), &view)), vec![2]);
        let view = ViewQuery::default().with_query("hour");
        assert_eq!(ids(&derive_view(&base(), &view)), vec![4]);
    }

    #[test]
    fn alphabetical_sorts_titles_ascending() {
        let view = ViewQuery::default().with_sort(Some(SortKey::Alphabetical));
        assert_eq!(ids(&derive_view(&base(), &view)), vec![3, 1, 2, 4]);
    }

    #[test]
    fn score_sort_is_descending_and_stable() {
        let view = ViewQuery::default().with_sort(Some(SortKey::Score));
        // 2 and 3 tie on 7.9 and keep their relative order.
        assert_eq!(ids(&derive_view(&base(), &view)), vec![4, 1, 2, 3]);
    }

    #[test]
    fn recency_puts_highest_id_first() {
        let view = ViewQuery::default().with_sort(Some(SortKey::Recency));
        assert_eq!(ids(&derive_view(&base(), &view)), vec![4, 3, 2, 1]);
    }

    #[test]
    fn promoted_puts_featured_first_then_score() {
        let view = ViewQuery::default().with_sort(Some(SortKey::Promoted));
        assert_eq!(ids(&derive_view(&base(), &view)), vec![1, 4, 2, 3]);
    }

    #[test]
    fn changing_sort_keeps_filter_and_query() {
        let view = ViewQuery::default()
            .with_filter(Some("Action".into()))
            .with_query("h");
        let sorted = view.with_sort(Some(SortKey::Score));
        assert_eq!(sorted.filter.as_deref(), Some("Action"));
        assert_eq!(sorted.query, "h");
        assert_eq!(ids(&derive_view(&base(), &sorted)), vec![4, 1]);
    }

    #[test]
    fn filter_then_clear_returns_baseline() {
        let baseline = derive_view(&base(), &ViewQuery::default());
        let filtered = ViewQuery::default().with_filter(Some("Action".into()));
        assert_ne!(derive_view(&base(), &filtered), baseline);
        let cleared = filtered.with_filter(None);
        assert_eq!(derive_view(&base(), &cleared), baseline);
    }

    #[test]
    fn same_inputs_give_identical_output() {
        let view = ViewQuery {
            filter: Some("Comedy".into()),
            query: "a".into(),
            sort: Some(SortKey::Promoted),
        };
        assert_eq!(derive_view(&base(), &view), derive_view(&base(), &view));
        assert_eq!(derive_view(&base(), &view)[0].id, ItemId(2));
    }
}
