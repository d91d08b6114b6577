//! Static in-memory catalog with simulated latency and failure injection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::error::{FetchError, MutationError};
use super::model::{Ack, Delta, Item, ItemId, UserProfile};
use super::source::CatalogSource;
use super::view::matches_query;

/// Data source operation, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FetchAll,
    FetchByFilter,
    FetchFeatured,
    Search,
    Mutate,
    Profile,
}

struct CatalogData {
    items: Vec<Item>,
    profile: UserProfile,
}

/// Catalog held entirely in memory.
///
/// Reads clone out of a `RwLock`; writes take the write lock only for the
/// duration of the update, never across an await point.
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
    latency: Duration,
    search_delays: Mutex<HashMap<String, Duration>>,
    failing: RwLock<HashSet<Operation>>,
    searches: Mutex<Vec<String>>,
    mutations: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            data: RwLock::new(CatalogData {
                items,
                profile: UserProfile::default(),
            }),
            latency: Duration::ZERO,
            search_delays: Mutex::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            searches: Mutex::new(Vec::new()),
            mutations: AtomicUsize::new(0),
        }
    }

    /// The catalog shipped with the demo application.
    pub fn demo() -> Self {
        Self::new(vec![
            Item::new(1, "Heat Run", "Action", 8.5)
                .with_description("A getaway driver takes one last job.")
                .featured(),
            Item::new(2, "Paper Moons", "Comedy", 7.9)
                .with_description("Two rival magicians share a flat."),
            Item::new(3, "Quiet Harbor", "Drama", 8.8)
                .with_description("A lighthouse keeper's final winter."),
            Item::new(4, "Laugh Track", "Comedy", 6.4)
                .with_description("A sitcom writer loses her sense of humor."),
            Item::new(5, "Iron Tide", "Action", 7.2)
                .with_description("Salvage divers find a sunken warship.")
                .featured(),
            Item::new(6, "Northern Lights", "Documentary", 9.1)
                .with_description("A year above the arctic circle."),
            Item::new(7, "Static", "Drama", 7.9)
                .with_description("A radio host takes a call from the future."),
        ])
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.data.write().profile = profile;
        self
    }

    /// Makes every subsequent call to `operation` fail (or succeed again).
    pub fn set_failing(&self, operation: Operation, failing: bool) {
        let mut set = self.failing.write();
        if failing {
            set.insert(operation);
        } else {
            set.remove(&operation);
        }
    }

    /// Overrides the latency of `search` for one exact query.
    pub fn set_search_delay(&self, query: &str, delay: Duration) {
        self.search_delays.lock().insert(query.to_string(), delay);
    }

    /// Queries passed to `search`, in call order.
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().clone()
    }

    /// Number of `mutate` calls, successful or not.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn is_failing(&self, operation: Operation) -> bool {
        self.failing.read().contains(&operation)
    }

    async fn simulate(&self, operation: Operation) -> Result<(), FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_failing(operation) {
            tracing::debug!(?operation, "Injected fetch failure");
            return Err(FetchError::Unavailable {
                reason: "network unreachable".to_string(),
            });
        }
        Ok(())
    }

    fn select(&self, predicate: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.data
            .read()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_all(&self) -> Result<Vec<Item>, FetchError> {
        self.simulate(Operation::FetchAll).await?;
        Ok(self.select(|_| true))
    }

    async fn fetch_by_filter(&self, category: &str) -> Result<Vec<Item>, FetchError> {
        self.simulate(Operation::FetchByFilter).await?;
        Ok(self.select(|item| item.category == category))
    }

    async fn fetch_featured(&self) -> Result<Vec<Item>, FetchError> {
        self.simulate(Operation::FetchFeatured).await?;
        Ok(self.select(|item| item.featured))
    }

    async fn search(&self, query: &str) -> Result<Vec<Item>, FetchError> {
        self.searches.lock().push(query.to_string());
        let delay = self.search_delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.simulate(Operation::Search).await?;
        Ok(self.select(|item| matches_query(item, query)))
    }

    async fn mutate(&self, id: ItemId, delta: Delta) -> Result<Ack, MutationError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_failing(Operation::Mutate) {
            return Err(MutationError::Rejected {
                id,
                reason: "server refused the change".to_string(),
            });
        }

        let mut data = self.data.write();
        let item = data
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(MutationError::NotFound { id })?;
        match delta {
            Delta::ToggleFavorite => item.favorite = !item.favorite,
        }
        Ok(Ack {
            id,
            favorite: item.favorite,
        })
    }

    async fn fetch_profile(&self) -> Result<UserProfile, FetchError> {
        self.simulate(Operation::Profile).await?;
        Ok(self.data.read().profile.clone())
    }

    async fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, MutationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_failing(Operation::Mutate) {
            return Err(MutationError::Rejected {
                id: ItemId(0),
                reason: "profile service refused the change".to_string(),
            });
        }
        self.data.write().profile = profile.clone();
        Ok(profile)
    }
}
