//! Base trait for UI state in MVI architecture.

use std::fmt::Debug;

/// Marker trait for snapshot objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Build the feature's error snapshot, if it has one.
    ///
    /// The dispatcher uses this to surface handler failures. Features
    /// without an error variant keep the default and failures are only
    /// logged.
    fn error(_message: String) -> Option<Self> {
        None
    }
}
