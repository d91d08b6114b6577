//! Model-View-Intent (MVI) state containers.
//!
//! This module provides the engine every feature screen is built on.
//!
//! # Architecture
//!
//! ```text
//! dispatch(Intent) ──→ queue ──→ Handler ──→ emit(State) ──→ SnapshotStream
//!        ↑                          │                              │
//!        │                 CatalogSource / Debouncer               │
//!        └─────────────────── presentation layer ←─────────────────┘
//! ```
//!
//! - **State**: Immutable, value-comparable snapshot of one screen
//! - **Intent**: User actions or system events
//! - **Handler**: Async routine bound to one intent tag; may emit several
//!   snapshots (e.g. Loading then Loaded)
//! - **Container**: Owns the current snapshot and runs handlers one at a
//!   time, in arrival order

mod container;
mod debounce;
mod emitter;
mod error;
mod handler;
mod intent;
mod optimistic;
mod state;

pub use container::{Container, Dispatcher};
pub use debounce::{Debouncer, RequestToken};
pub use emitter::{Emitter, SnapshotStream};
pub use error::HandlerError;
pub use handler::{Feature, Handler, HandlerContext, HandlerFuture, HandlerRegistry};
pub use intent::Intent;
pub use optimistic::{run_optimistic, OptimisticUpdate, PendingOperation};
pub use state::UiState;
