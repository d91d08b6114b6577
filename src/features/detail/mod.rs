//! Item detail feature.

mod intent;
mod reducer;
mod state;

pub use intent::DetailIntent;
pub use reducer::DetailFeature;
pub use state::DetailState;
