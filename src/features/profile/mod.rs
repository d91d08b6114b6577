//! User profile feature.

mod intent;
mod reducer;
mod state;

pub use intent::ProfileIntent;
pub use reducer::{validate_display_name, ProfileFeature, MAX_DISPLAY_NAME};
pub use state::ProfileState;
