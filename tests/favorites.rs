//! Favorites feature: optimistic toggle, confirmation and rollback.

mod common;

use std::collections::BTreeSet;

use catalog_mvi::catalog::{ItemId, Operation};
use catalog_mvi::features::favorites::{FavoritesFeature, FavoritesIntent, FavoritesState};
use catalog_mvi::mvi::Container;

use common::{as_source, scenario_catalog, scenario_items};

fn ids(raw: &[u32]) -> BTreeSet<ItemId> {
    raw.iter().copied().map(ItemId).collect()
}

#[tokio::test]
async fn failed_toggle_rolls_back_to_exact_prior() {
    let catalog = scenario_catalog();
    catalog.set_failing(Operation::Mutate, true);
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    common::run(&container, &mut stream, [FavoritesIntent::Load]).await;
    let prior = container.current_snapshot();
    assert_eq!(prior, FavoritesState::from_items(scenario_items()));

    let seen = common::run(&container, &mut stream, [FavoritesIntent::toggle(2)]).await;

    assert_eq!(
        seen,
        vec![
            FavoritesState::Pending {
                entity_id: ItemId(2),
                favorite: true,
                favorites: ids(&[2]),
            },
            FavoritesState::Error {
                message: "Could not update item 2: server refused the change".into()
            },
            prior.clone(),
        ]
    );
    assert_eq!(container.current_snapshot(), prior);
    assert_eq!(catalog.mutation_count(), 1);
}

#[tokio::test]
async fn successful_toggle_confirms_from_refetch() {
    let catalog = scenario_catalog();
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();
    common::run(&container, &mut stream, [FavoritesIntent::Load]).await;

    let seen = common::run(&container, &mut stream, [FavoritesIntent::toggle(1)]).await;

    assert_eq!(seen.len(), 2);
    assert!(seen[0].is_pending());
    assert_eq!(seen[1].favorites(), Some(&ids(&[1])));
    assert!(!seen[1].is_pending());
}

#[tokio::test]
async fn refetch_failure_after_success_uses_acknowledged_value() {
    let catalog = scenario_catalog();
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();
    common::run(&container, &mut stream, [FavoritesIntent::Load]).await;

    catalog.set_failing(Operation::FetchAll, true);
    let seen = common::run(&container, &mut stream, [FavoritesIntent::toggle(2)]).await;

    let mut expected = scenario_items();
    expected[1].favorite = true;
    assert_eq!(seen.last(), Some(&FavoritesState::from_items(expected)));
}

#[tokio::test]
async fn toggles_of_same_item_apply_in_order() {
    let catalog = scenario_catalog();
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    let seen = common::run(
        &container,
        &mut stream,
        [
            FavoritesIntent::Load,
            FavoritesIntent::toggle(2),
            FavoritesIntent::toggle(2),
        ],
    )
    .await;

    let pending: Vec<bool> = seen
        .iter()
        .filter_map(|state| match state {
            FavoritesState::Pending { favorite, .. } => Some(*favorite),
            _ => None,
        })
        .collect();
    assert_eq!(pending, vec![true, false]);
    assert_eq!(container.current_snapshot().favorites(), Some(&ids(&[])));
    assert_eq!(catalog.mutation_count(), 2);
}

#[tokio::test]
async fn unknown_item_is_rejected_without_mutation() {
    let catalog = scenario_catalog();
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();
    common::run(&container, &mut stream, [FavoritesIntent::Load]).await;
    let prior = container.current_snapshot();

    let seen = common::run(&container, &mut stream, [FavoritesIntent::toggle(99)]).await;

    assert_eq!(
        seen,
        vec![
            FavoritesState::Error {
                message: "Unknown item 99".into()
            },
            prior,
        ]
    );
    assert_eq!(catalog.mutation_count(), 0);
}

#[tokio::test]
async fn toggle_before_load_is_ignored() {
    let catalog = scenario_catalog();
    let container = Container::spawn(FavoritesFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    let seen = common::run(&container, &mut stream, [FavoritesIntent::toggle(1)]).await;

    assert_eq!(seen, vec![FavoritesState::Initial]);
    assert_eq!(catalog.mutation_count(), 0);
}
