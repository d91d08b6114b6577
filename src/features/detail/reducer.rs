use std::sync::Arc;

use crate::catalog::{derive_view, CatalogSource, FetchError, Item, ItemId, SortKey, ViewQuery};
use crate::mvi::{Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent};

use super::intent::DetailIntent;
use super::state::DetailState;

type Ctx = HandlerContext<DetailFeature>;

/// Item detail with a related-items sidebar.
///
/// The item itself is the primary load; the sidebar is a secondary fetch
/// whose failure never replaces a loaded item.
pub struct DetailFeature {
    source: Arc<dyn CatalogSource>,
    item: Option<Item>,
}

impl DetailFeature {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source, item: None }
    }

    async fn load(&mut self, id: ItemId, ctx: &Ctx) -> Result<(), HandlerError> {
        ctx.emit(DetailState::Loading);
        self.item = None;

        let item = self
            .source
            .fetch_all()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(FetchError::NotFound { id })?;

        ctx.emit(DetailState::Loaded {
            item: item.clone(),
            related: Vec::new(),
        });
        self.item = Some(item);
        self.load_related(ctx).await;
        Ok(())
    }

    async fn load_related(&self, ctx: &Ctx) {
        let Some(item) = &self.item else {
            tracing::debug!("No item loaded, related refresh skipped");
            return;
        };

        match self.source.fetch_by_filter(&item.category).await {
            Ok(candidates) => {
                let others: Vec<Item> = candidates
                    .into_iter()
                    .filter(|candidate| candidate.id != item.id)
                    .collect();
                let related = derive_view(
                    &others,
                    &ViewQuery::default().with_sort(Some(SortKey::Score)),
                );
                ctx.emit(DetailState::Loaded {
                    item: item.clone(),
                    related,
                });
            }
            Err(err) => {
                tracing::warn!(item = %item.id, error = %err, "Related items unavailable, keeping detail");
            }
        }
    }
}

impl Feature for DetailFeature {
    type State = DetailState;
    type Intent = DetailIntent;

    fn name(&self) -> &'static str {
        "detail"
    }

    fn initial_state(&self) -> DetailState {
        DetailState::Initial
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on(DetailIntent::LOAD, on_load)
            .on(DetailIntent::REFRESH_RELATED, on_refresh_related);
    }
}

fn on_load(feature: &mut DetailFeature, intent: DetailIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            DetailIntent::Load { id } => feature.load(id, &ctx).await,
            other => Err(HandlerError::unexpected_intent(other.tag())),
        }
    })
}

fn on_refresh_related(
    feature: &mut DetailFeature,
    _intent: DetailIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        feature.load_related(&ctx).await;
        Ok(())
    })
}
