use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use catalog_mvi::catalog::{CatalogSource, InMemoryCatalog, ItemId, Operation, SortKey};
use catalog_mvi::config::Config;
use catalog_mvi::features::categories::{CategoriesFeature, CategoriesIntent};
use catalog_mvi::features::detail::{DetailFeature, DetailIntent};
use catalog_mvi::features::favorites::{FavoritesFeature, FavoritesIntent};
use catalog_mvi::features::listing::{ListingFeature, ListingIntent};
use catalog_mvi::features::profile::{ProfileFeature, ProfileIntent};
use catalog_mvi::logging::init_tracing;
use catalog_mvi::mvi::{Container, Feature, SnapshotStream};

/// Runs a scripted session of every feature against the demo catalog and
/// prints the snapshots each container emits.
#[derive(Debug, Parser)]
#[command(name = "catalog-mvi", version)]
struct Args {
    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print snapshots as JSON lines.
    #[arg(long)]
    json: bool,

    /// Make every mutation fail to demonstrate rollback.
    #[arg(long)]
    fail_mutations: bool,

    /// Category used for filtering and browsing.
    #[arg(long, default_value = "Comedy")]
    category: String,

    /// Search text typed into the listing.
    #[arg(long, default_value = "harbor")]
    query: String,

    #[arg(long, value_enum, default_value = "score")]
    sort: SortKey,

    /// Item to open and to favorite.
    #[arg(long, default_value_t = 2)]
    item: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if args.fail_mutations && !config.source.fail.contains(&Operation::Mutate) {
        config.source.fail.push(Operation::Mutate);
    }
    init_tracing(&config.logging);

    let catalog = InMemoryCatalog::demo().with_latency(config.source.latency());
    for operation in &config.source.fail {
        catalog.set_failing(*operation, true);
    }
    let source: Arc<dyn CatalogSource> = Arc::new(catalog);
    let printer = Printer { json: args.json };

    let listing = Container::spawn(ListingFeature::new(
        Arc::clone(&source),
        config.engine.debounce(),
    ));
    let mut stream = listing.observe();
    listing.dispatch(ListingIntent::Load);
    listing.dispatch(ListingIntent::filter(&args.category));
    listing.dispatch(ListingIntent::SortBy {
        sort: Some(args.sort),
    });
    listing.settled().await;
    for prefix in typing_prefixes(&args.query) {
        listing.dispatch(ListingIntent::query(&prefix));
    }
    // Quiet window, then the lookup itself.
    tokio::time::sleep(config.engine.debounce() + config.source.latency() * 2 + Duration::from_millis(50)).await;
    listing.settled().await;
    printer.print("listing", &mut stream)?;
    listing.close();

    let favorites = Container::spawn(FavoritesFeature::new(Arc::clone(&source)));
    run_script(
        &printer,
        "favorites",
        &favorites,
        [FavoritesIntent::Load, FavoritesIntent::toggle(args.item)],
    )
    .await?;

    let detail = Container::spawn(DetailFeature::new(Arc::clone(&source)));
    run_script(
        &printer,
        "detail",
        &detail,
        [DetailIntent::Load {
            id: ItemId(args.item),
        }],
    )
    .await?;

    let categories = Container::spawn(CategoriesFeature::new(Arc::clone(&source)));
    run_script(
        &printer,
        "categories",
        &categories,
        [
            CategoriesIntent::Load,
            CategoriesIntent::select(&args.category),
        ],
    )
    .await?;

    let profile = Container::spawn(ProfileFeature::new(Arc::clone(&source)));
    run_script(
        &printer,
        "profile",
        &profile,
        [
            ProfileIntent::Load,
            ProfileIntent::UpdateDisplayName {
                name: "  Movie Buff  ".to_string(),
            },
        ],
    )
    .await?;

    Ok(())
}

/// Simulates typing: "ab" becomes ["a", "ab"].
fn typing_prefixes(text: &str) -> Vec<String> {
    text.char_indices()
        .map(|(index, ch)| text[..index + ch.len_utf8()].to_string())
        .collect()
}

async fn run_script<F, const N: usize>(
    printer: &Printer,
    label: &str,
    container: &Container<F>,
    intents: [F::Intent; N],
) -> anyhow::Result<()>
where
    F: Feature,
    F::State: Serialize,
{
    let mut stream = container.observe();
    for intent in intents {
        container.dispatch(intent);
    }
    container.settled().await;
    printer.print(label, &mut stream)?;
    container.close();
    Ok(())
}

struct Printer {
    json: bool,
}

impl Printer {
    fn print<S>(&self, label: &str, stream: &mut SnapshotStream<S>) -> anyhow::Result<()>
    where
        S: Serialize + Debug,
    {
        for snapshot in stream.drain() {
            if self.json {
                let line = serde_json::to_string(&snapshot)
                    .with_context(|| format!("serializing {label} snapshot"))?;
                println!("{{\"feature\":\"{label}\",\"snapshot\":{line}}}");
            } else {
                println!("[{label}] {snapshot:?}");
            }
        }
        Ok(())
    }
}
