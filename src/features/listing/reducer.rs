use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{derive_view, CatalogSource, FetchError, Item, ItemId, SortKey, ViewQuery};
use crate::mvi::{
    Debouncer, Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent,
    RequestToken,
};

use super::intent::ListingIntent;
use super::state::ListingState;

type Ctx = HandlerContext<ListingFeature>;

/// Catalog listing: full collection with filter, sort and debounced search.
pub struct ListingFeature {
    source: Arc<dyn CatalogSource>,
    /// Last successful `fetch_all`. `None` until the first load lands.
    cache: Option<Vec<Item>>,
    /// Ids returned by the latest accepted lookup. While a query is active
    /// the view is the cache restricted to these ids.
    search_hits: Option<BTreeSet<ItemId>>,
    view: ViewQuery,
    debouncer: Debouncer,
}

impl ListingFeature {
    pub fn new(source: Arc<dyn CatalogSource>, debounce: Duration) -> Self {
        Self {
            source,
            cache: None,
            search_hits: None,
            view: ViewQuery::default(),
            debouncer: Debouncer::new(debounce),
        }
    }

    fn has_data(&self) -> bool {
        self.cache.is_some()
    }

    fn loaded(&self) -> ListingState {
        let cache = self.cache.as_deref().unwrap_or_default();
        let base: Vec<Item> = match &self.search_hits {
            Some(hits) => cache
                .iter()
                .filter(|item| hits.contains(&item.id))
                .cloned()
                .collect(),
            None => cache.to_vec(),
        };
        ListingState::Loaded {
            items: derive_view(&base, &self.view),
            filter: self.view.filter.clone(),
            sort: self.view.sort,
            query: self.view.query.clone(),
        }
    }

    /// Emits the recomputed view if there is anything to show. Before the
    /// first load only the triple is remembered.
    fn reapply(&self, ctx: &Ctx) {
        if self.has_data() {
            ctx.emit(self.loaded());
        }
    }

    async fn load(&mut self, ctx: Ctx) -> Result<(), HandlerError> {
        ctx.emit(ListingState::Loading);
        self.fetch(&ctx).await
    }

    async fn refresh(&mut self, ctx: Ctx) -> Result<(), HandlerError> {
        if !ctx.current().is_loaded() {
            ctx.emit(ListingState::Loading);
        }
        self.fetch(&ctx).await
    }

    async fn fetch(&mut self, ctx: &Ctx) -> Result<(), HandlerError> {
        let items = self.source.fetch_all().await?;
        tracing::debug!(count = items.len(), "Catalog fetched");
        self.cache = Some(items);
        ctx.emit(self.loaded());
        Ok(())
    }

    fn filter_by(&mut self, category: Option<String>, ctx: &Ctx) {
        self.view = self.view.with_filter(category);
        self.reapply(ctx);
    }

    fn sort_by(&mut self, sort: Option<SortKey>, ctx: &Ctx) {
        self.view = self.view.with_sort(sort);
        self.reapply(ctx);
    }

    fn query_changed(&mut self, query: String, ctx: &Ctx) {
        if query.trim().is_empty() {
            let token = self.debouncer.reset();
            tracing::debug!(token, "Query cleared");
            self.search_hits = None;
            self.view = self.view.with_query("");
            self.reapply(ctx);
            return;
        }
        let token = self
            .debouncer
            .schedule(ctx.dispatcher(), move |token| ListingIntent::QuerySettled {
                query,
                token,
            });
        tracing::trace!(token, "Query lookup scheduled");
    }

    /// Starts the lookup outside the queue so later input is not held up
    /// behind a slow search.
    fn query_settled(&self, query: String, token: RequestToken, ctx: &Ctx) {
        if !self.debouncer.is_current(token) {
            tracing::trace!(token, "Superseded query trigger ignored");
            return;
        }
        tracing::debug!(token, query = %query, "Starting lookup");
        let source = Arc::clone(&self.source);
        let dispatcher = ctx.dispatcher().clone();
        tokio::spawn(async move {
            let result = source.search(&query).await;
            dispatcher.dispatch(ListingIntent::QueryResolved {
                query,
                token,
                result,
            });
        });
    }

    fn query_resolved(
        &mut self,
        query: String,
        token: RequestToken,
        result: Result<Vec<Item>, FetchError>,
        ctx: &Ctx,
    ) {
        if !self.debouncer.is_current(token) {
            tracing::debug!(token, latest = self.debouncer.latest(), "Discarding stale lookup result");
            return;
        }
        match result {
            Ok(hits) => {
                tracing::debug!(token, count = hits.len(), "Lookup applied");
                self.search_hits = Some(hits.into_iter().map(|item| item.id).collect());
                self.view = self.view.with_query(query);
                self.reapply(ctx);
            }
            Err(err) => {
                // The list on screen is still valid; only the search failed.
                tracing::warn!(token, error = %err, "Lookup failed, keeping current list");
            }
        }
    }
}

impl Feature for ListingFeature {
    type State = ListingState;
    type Intent = ListingIntent;

    fn name(&self) -> &'static str {
        "listing"
    }

    fn initial_state(&self) -> ListingState {
        ListingState::Initial
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on(ListingIntent::LOAD, on_load)
            .on(ListingIntent::REFRESH, on_refresh)
            .on(ListingIntent::FILTER_BY, on_filter_by)
            .on(ListingIntent::SORT_BY, on_sort_by)
            .on(ListingIntent::QUERY_CHANGED, on_query_changed)
            .on(ListingIntent::QUERY_SETTLED, on_query_settled)
            .on(ListingIntent::QUERY_RESOLVED, on_query_resolved);
    }
}

fn on_load(feature: &mut ListingFeature, _intent: ListingIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(feature.load(ctx))
}

fn on_refresh(feature: &mut ListingFeature, _intent: ListingIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(feature.refresh(ctx))
}

fn on_filter_by(feature: &mut ListingFeature, intent: ListingIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ListingIntent::FilterBy { category } => feature.filter_by(category, &ctx),
            other => return Err(HandlerError::unexpected_intent(other.tag())),
        }
        Ok(())
    })
}

fn on_sort_by(feature: &mut ListingFeature, intent: ListingIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ListingIntent::SortBy { sort } => feature.sort_by(sort, &ctx),
            other => return Err(HandlerError::unexpected_intent(other.tag())),
        }
        Ok(())
    })
}

fn on_query_changed(
    feature: &mut ListingFeature,
    intent: ListingIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ListingIntent::QueryChanged { query } => feature.query_changed(query, &ctx),
            other => return Err(HandlerError::unexpected_intent(other.tag())),
        }
        Ok(())
    })
}

fn on_query_settled(
    feature: &mut ListingFeature,
    intent: ListingIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ListingIntent::QuerySettled { query, token } => {
                feature.query_settled(query, token, &ctx)
            }
            other => return Err(HandlerError::unexpected_intent(other.tag())),
        }
        Ok(())
    })
}

fn on_query_resolved(
    feature: &mut ListingFeature,
    intent: ListingIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ListingIntent::QueryResolved {
                query,
                token,
                result,
            } => feature.query_resolved(query, token, result, &ctx),
            other => return Err(HandlerError::unexpected_intent(other.tag())),
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[test]
    fn every_intent_has_a_handler() {
        let registry = HandlerRegistry::<ListingFeature>::for_feature();
        let intents = [
            ListingIntent::Load,
            ListingIntent::Refresh,
            ListingIntent::filter("Drama"),
            ListingIntent::SortBy { sort: None },
            ListingIntent::query("a"),
            ListingIntent::QuerySettled {
                query: "a".into(),
                token: 1,
            },
            ListingIntent::QueryResolved {
                query: "a".into(),
                token: 1,
                result: Ok(Vec::new()),
            },
        ];
        for intent in intents {
            assert!(registry.contains(intent.tag()), "missing {}", intent.tag());
        }
        assert_eq!(registry.tags().len(), 7);
    }

    #[test]
    fn view_before_load_is_empty() {
        let feature = ListingFeature::new(
            Arc::new(InMemoryCatalog::demo()),
            Duration::from_millis(500),
        );
        assert!(!feature.has_data());
        assert!(feature.loaded().items().is_empty());
    }
}
