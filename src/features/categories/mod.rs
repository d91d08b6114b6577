//! Category browsing feature.

mod intent;
mod reducer;
mod state;

pub use intent::CategoriesIntent;
pub use reducer::CategoriesFeature;
pub use state::CategoriesState;
