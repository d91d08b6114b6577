//! Per-screen feature containers.
//!
//! Every feature follows the same layout:
//! - `state.rs` - Snapshot enum
//! - `intent.rs` - User/system actions
//! - `reducer.rs` - Handlers, registered per intent tag

pub mod categories;
pub mod detail;
pub mod favorites;
pub mod listing;
pub mod profile;
