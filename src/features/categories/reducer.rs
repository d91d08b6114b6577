use std::collections::BTreeSet;
use std::sync::Arc;

use crate::catalog::{
    derive_view, CatalogSource, Item, SortKey, ValidationError, ViewQuery,
};
use crate::mvi::{Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent};

use super::intent::CategoriesIntent;
use super::state::CategoriesState;

type Ctx = HandlerContext<CategoriesFeature>;

/// Category browsing: the list of categories, the featured strip and the
/// items of the selected category.
pub struct CategoriesFeature {
    source: Arc<dyn CatalogSource>,
    categories: Vec<String>,
    featured: Vec<Item>,
}

impl CategoriesFeature {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            categories: Vec::new(),
            featured: Vec::new(),
        }
    }

    fn loaded(&self, selected: Option<String>, items: Vec<Item>) -> CategoriesState {
        CategoriesState::Loaded {
            categories: self.categories.clone(),
            selected,
            items,
            featured: self.featured.clone(),
        }
    }

    async fn load(&mut self, ctx: &Ctx) -> Result<(), HandlerError> {
        ctx.emit(CategoriesState::Loading);

        let all = self.source.fetch_all().await?;
        self.categories = all
            .into_iter()
            .map(|item| item.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        match self.source.fetch_featured().await {
            Ok(featured) => {
                self.featured = derive_view(
                    &featured,
                    &ViewQuery::default().with_sort(Some(SortKey::Score)),
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "Featured items unavailable");
                self.featured.clear();
            }
        }

        ctx.emit(self.loaded(None, Vec::new()));
        Ok(())
    }

    async fn select(&mut self, category: String, ctx: &Ctx) -> Result<(), HandlerError> {
        if !self.categories.contains(&category) {
            ctx.reject(ValidationError::UnknownCategory(category));
            return Ok(());
        }
        // The category list stays usable if one category cannot be fetched.
        match self.source.fetch_by_filter(&category).await {
            Ok(items) => ctx.emit(self.loaded(Some(category), items)),
            Err(err) => ctx.reject(err),
        }
        Ok(())
    }

    fn clear_selection(&self, ctx: &Ctx) {
        if ctx.current().selected().is_some() {
            ctx.emit(self.loaded(None, Vec::new()));
        }
    }
}

impl Feature for CategoriesFeature {
    type State = CategoriesState;
    type Intent = CategoriesIntent;

    fn name(&self) -> &'static str {
        "categories"
    }

    fn initial_state(&self) -> CategoriesState {
        CategoriesState::Initial
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on(CategoriesIntent::LOAD, on_load)
            .on(CategoriesIntent::SELECT, on_select)
            .on(CategoriesIntent::CLEAR_SELECTION, on_clear_selection);
    }
}

fn on_load(feature: &mut CategoriesFeature, _intent: CategoriesIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move { feature.load(&ctx).await })
}

fn on_select(feature: &mut CategoriesFeature, intent: CategoriesIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            CategoriesIntent::Select { category } => feature.select(category, &ctx).await,
            other => Err(HandlerError::unexpected_intent(other.tag())),
        }
    })
}

fn on_clear_selection(
    feature: &mut CategoriesFeature,
    _intent: CategoriesIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        feature.clear_selection(&ctx);
        Ok(())
    })
}
