//! Catalog domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog item. Ids are assigned in insertion order, so a
/// larger id means a more recent item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Rating on a 0-10 scale.
    pub score: f32,
    /// Promoted by the catalog owner.
    #[serde(default)]
    pub featured: bool,
    /// Marked as favorite by the user.
    #[serde(default)]
    pub favorite: bool,
}

impl Item {
    pub fn new(id: u32, title: &str, category: &str, score: f32) -> Self {
        Self {
            id: ItemId(id),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            score,
            featured: false,
            favorite: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn favorited(mut self) -> Self {
        self.favorite = true;
        self
    }
}

/// The signed-in user as shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub member_since: u16,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            display_name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            member_since: 2024,
        }
    }
}

/// Change requested through [`CatalogSource::mutate`](super::CatalogSource::mutate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    ToggleFavorite,
}

/// Acknowledgement of an accepted mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub id: ItemId,
    /// Favorite flag of the item after the mutation was applied.
    pub favorite: bool,
}
