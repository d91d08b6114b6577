//! Catalog listing feature.
//!
//! Shows the whole catalog and lets the user narrow it down by category,
//! reorder it and search it. Search input is debounced; only the newest
//! lookup result is ever applied.
//!
//! - `state.rs` - Snapshot enum
//! - `intent.rs` - User/system actions
//! - `reducer.rs` - Handlers and the feature's cached data

mod intent;
mod reducer;
mod state;

pub use intent::ListingIntent;
pub use reducer::ListingFeature;
pub use state::ListingState;
