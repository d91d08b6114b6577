//! Catalog domain: items, the data source collaborator and derived views.

mod error;
mod memory;
mod model;
mod source;
mod view;

pub use error::{FetchError, MutationError, ValidationError};
pub use memory::{InMemoryCatalog, Operation};
pub use model::{Ack, Delta, Item, ItemId, UserProfile};
pub use source::CatalogSource;
pub use view::{derive_view, matches_query, SortKey, ViewQuery};
