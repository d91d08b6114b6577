//! Asynchronous data source consumed by the feature containers.

use async_trait::async_trait;

use super::error::{FetchError, MutationError};
use super::model::{Ack, Delta, Item, ItemId, UserProfile};

/// Backing store of the catalog.
///
/// Every call is independently failable. Containers never cache anything
/// the source returns beyond their own base collection, so an
/// implementation is free to answer each call from scratch.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the full collection in catalog order.
    async fn fetch_all(&self) -> Result<Vec<Item>, FetchError>;

    /// Returns the items whose category equals `category`.
    async fn fetch_by_filter(&self, category: &str) -> Result<Vec<Item>, FetchError>;

    /// Returns the promoted items.
    async fn fetch_featured(&self) -> Result<Vec<Item>, FetchError>;

    /// Free-text lookup over titles and descriptions.
    async fn search(&self, query: &str) -> Result<Vec<Item>, FetchError>;

    /// Applies `delta` to the item with the given id.
    async fn mutate(&self, id: ItemId, delta: Delta) -> Result<Ack, MutationError>;

    async fn fetch_profile(&self) -> Result<UserProfile, FetchError>;

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, MutationError>;
}
