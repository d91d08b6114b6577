//! Shared test utilities and catalog fixtures.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use catalog_mvi::catalog::{CatalogSource, InMemoryCatalog, Item};
use catalog_mvi::mvi::{Container, Feature, SnapshotStream};

pub const DEBOUNCE: Duration = Duration::from_millis(500);

// -- Fixtures -----------------------------------------------------------------

/// The two-item catalog used by the documented scenarios.
pub fn scenario_items() -> Vec<Item> {
    vec![
        Item::new(1, "Heat Run", "Action", 8.5),
        Item::new(2, "Paper Moons", "Comedy", 7.9),
    ]
}

pub fn scenario_catalog() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::new(scenario_items()))
}

pub fn demo_catalog() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::demo())
}

pub fn as_source(catalog: &Arc<InMemoryCatalog>) -> Arc<dyn CatalogSource> {
    Arc::clone(catalog) as Arc<dyn CatalogSource>
}

// -- Container helpers --------------------------------------------------------

/// Dispatches `intents`, waits for the queue to drain and returns every
/// snapshot the stream has seen so far.
pub async fn run<F: Feature>(
    container: &Container<F>,
    stream: &mut SnapshotStream<F::State>,
    intents: impl IntoIterator<Item = F::Intent>,
) -> Vec<F::State> {
    for intent in intents {
        container.dispatch(intent);
    }
    container.settled().await;
    stream.drain()
}

/// Lets timers and background tasks run for `duration` of (paused) time,
/// then waits for the queue to drain.
pub async fn wait<F: Feature>(container: &Container<F>, duration: Duration) {
    tokio::time::sleep(duration).await;
    container.settled().await;
}
