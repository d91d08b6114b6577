//! Profile feature: load and validated display-name updates.

mod common;

use catalog_mvi::catalog::{CatalogSource, Operation, UserProfile};
use catalog_mvi::features::profile::{ProfileFeature, ProfileIntent, ProfileState};
use catalog_mvi::mvi::Container;

use common::{as_source, demo_catalog};

fn rename(name: &str) -> ProfileIntent {
    ProfileIntent::UpdateDisplayName {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn load_shows_profile_and_favorite_count() {
    let catalog = demo_catalog();
    let container = Container::spawn(ProfileFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    let seen = common::run(&container, &mut stream, [ProfileIntent::Load]).await;

    assert_eq!(
        seen,
        vec![
            ProfileState::Initial,
            ProfileState::Loading,
            ProfileState::Loaded {
                profile: UserProfile::default(),
                favorite_count: 0,
            },
        ]
    );
}

#[tokio::test]
async fn rename_is_trimmed_and_persisted() {
    let catalog = demo_catalog();
    let container = Container::spawn(ProfileFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    common::run(
        &container,
        &mut stream,
        [ProfileIntent::Load, rename("  Movie Buff  ")],
    )
    .await;

    let state = container.current_snapshot();
    assert_eq!(
        state.profile().map(|profile| profile.display_name.as_str()),
        Some("Movie Buff")
    );
    let stored = catalog.fetch_profile().await.unwrap();
    assert_eq!(stored.display_name, "Movie Buff");
}

#[tokio::test]
async fn invalid_names_never_reach_the_source() {
    let catalog = demo_catalog();
    let container = Container::spawn(ProfileFeature::new(as_source(&catalog)));
    let mut stream = container.observe();
    common::run(&container, &mut stream, [ProfileIntent::Load]).await;
    let prior = container.current_snapshot();

    let seen = common::run(&container, &mut stream, [rename("   ")]).await;
    assert_eq!(
        seen,
        vec![
            ProfileState::Error {
                message: "Display name must not be empty".into()
            },
            prior.clone(),
        ]
    );

    let seen = common::run(&container, &mut stream, [rename(&"x".repeat(41))]).await;
    assert_eq!(
        seen[0],
        ProfileState::Error {
            message: "Display name is too long (41 characters, max 40)".into()
        }
    );
    assert_eq!(seen[1], prior);

    let stored = catalog.fetch_profile().await.unwrap();
    assert_eq!(stored, UserProfile::default());
}

#[tokio::test]
async fn rejected_update_restores_profile() {
    let catalog = demo_catalog();
    let container = Container::spawn(ProfileFeature::new(as_source(&catalog)));
    let mut stream = container.observe();
    common::run(&container, &mut stream, [ProfileIntent::Load]).await;
    let prior = container.current_snapshot();

    catalog.set_failing(Operation::Mutate, true);
    let seen = common::run(&container, &mut stream, [rename("Critic")]).await;

    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], ProfileState::Error { .. }));
    assert_eq!(seen[1], prior);
}

#[tokio::test]
async fn rename_before_load_is_ignored() {
    let catalog = demo_catalog();
    let container = Container::spawn(ProfileFeature::new(as_source(&catalog)));
    let mut stream = container.observe();

    let seen = common::run(&container, &mut stream, [rename("Critic")]).await;

    assert_eq!(seen, vec![ProfileState::Initial]);
}
