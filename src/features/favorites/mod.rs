//! Favorites feature: optimistic toggling with rollback.

mod intent;
mod reducer;
mod state;

pub use intent::FavoritesIntent;
pub use reducer::FavoritesFeature;
pub use state::FavoritesState;
