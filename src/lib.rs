//! Per-feature MVI state containers for a catalog browsing app.
//!
//! Each screen (listing, detail, categories, profile, favorites) runs its
//! own [`mvi::Container`]: intents are queued and handled one at a time,
//! and every committed snapshot is pushed to the container's subscribers.

pub mod catalog;
pub mod config;
pub mod features;
pub mod logging;
pub mod mvi;
