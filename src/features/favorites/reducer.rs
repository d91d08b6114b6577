use std::sync::Arc;

use crate::catalog::{Ack, CatalogSource, Delta, Item, ItemId, ValidationError};
use crate::mvi::{
    run_optimistic, Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent,
};

use super::intent::FavoritesIntent;
use super::state::FavoritesState;

type Ctx = HandlerContext<FavoritesFeature>;

/// Favorite toggling with optimistic feedback.
///
/// Toggles for the same item are ordered by the container queue, so a
/// rollback can only ever restore the snapshot its own toggle replaced.
/// Toggles for different items share that queue as well: each one waits
/// for the previous toggle to confirm or roll back before it starts.
pub struct FavoritesFeature {
    source: Arc<dyn CatalogSource>,
    cache: Option<Vec<Item>>,
}

impl FavoritesFeature {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    async fn load(&mut self, ctx: &Ctx) -> Result<(), HandlerError> {
        ctx.emit(FavoritesState::Loading);
        let items = self.source.fetch_all().await?;
        self.cache = Some(items.clone());
        ctx.emit(FavoritesState::from_items(items));
        Ok(())
    }

    async fn toggle(&mut self, id: ItemId, ctx: &Ctx) -> Result<(), HandlerError> {
        let Some(cache) = self.cache.clone() else {
            tracing::debug!(entity_id = %id, "Favorites not loaded, toggle ignored");
            return Ok(());
        };
        let Some(target) = cache.iter().find(|item| item.id == id) else {
            ctx.reject(ValidationError::UnknownItem(id));
            return Ok(());
        };
        let favorite = !target.favorite;

        let prior = ctx.current().clone();
        let mut expected = prior.favorites().cloned().unwrap_or_default();
        if favorite {
            expected.insert(id);
        } else {
            expected.remove(&id);
        }

        let source = Arc::clone(&self.source);
        let outcome = run_optimistic(
            ctx.emitter(),
            id,
            prior,
            |_| FavoritesState::Pending {
                entity_id: id,
                favorite,
                favorites: expected,
            },
            self.source.mutate(id, Delta::ToggleFavorite),
            |ack| confirm(source, cache, ack),
            |err| FavoritesState::Error {
                message: err.to_string(),
            },
        )
        .await;

        match outcome {
            Ok(FavoritesState::Loaded { items, .. }) => self.cache = Some(items),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(entity_id = %id, error = %err, "Toggle failed, rolled back");
            }
        }
        Ok(())
    }
}

/// Rebuilds the confirmed snapshot from a fresh fetch. If the fetch fails
/// after the mutation already succeeded, the acknowledged flag is applied
/// to the cached collection instead.
async fn confirm(source: Arc<dyn CatalogSource>, cache: Vec<Item>, ack: Ack) -> FavoritesState {
    match source.fetch_all().await {
        Ok(items) => FavoritesState::from_items(items),
        Err(err) => {
            tracing::warn!(entity_id = %ack.id, error = %err, "Refresh after toggle failed, using acknowledged value");
            let items = cache
                .into_iter()
                .map(|mut item| {
                    if item.id == ack.id {
                        item.favorite = ack.favorite;
                    }
                    item
                })
                .collect();
            FavoritesState::from_items(items)
        }
    }
}

impl Feature for FavoritesFeature {
    type State = FavoritesState;
    type Intent = FavoritesIntent;

    fn name(&self) -> &'static str {
        "favorites"
    }

    fn initial_state(&self) -> FavoritesState {
        FavoritesState::Initial
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on(FavoritesIntent::LOAD, on_load)
            .on(FavoritesIntent::TOGGLE, on_toggle);
    }
}

fn on_load(feature: &mut FavoritesFeature, _intent: FavoritesIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move { feature.load(&ctx).await })
}

fn on_toggle(feature: &mut FavoritesFeature, intent: FavoritesIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            FavoritesIntent::Toggle { id } => feature.toggle(id, &ctx).await,
            other => Err(HandlerError::unexpected_intent(other.tag())),
        }
    })
}
