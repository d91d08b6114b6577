//! Base trait for intents (user/system actions) in MVI architecture.

use std::fmt::Debug;

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (pull to refresh, typing in a search box, tapping a heart)
/// - System events (debounce timers firing, background lookups completing)
///
/// Intents are routed to handlers by their [`tag`](Intent::tag).
pub trait Intent: Debug + Send + 'static {
    /// Stable name of the variant, used as the handler registry key.
    ///
    /// Implement this with an exhaustive `match` so adding a variant
    /// without a tag is a compile error.
    fn tag(&self) -> &'static str;
}
