use std::sync::Arc;

use crate::catalog::{CatalogSource, UserProfile, ValidationError};
use crate::mvi::{Feature, HandlerContext, HandlerError, HandlerFuture, HandlerRegistry, Intent};

use super::intent::ProfileIntent;
use super::state::ProfileState;

type Ctx = HandlerContext<ProfileFeature>;

/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME: usize = 40;

/// Checks a display name before it is sent anywhere. Returns the trimmed
/// name.
pub fn validate_display_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_DISPLAY_NAME {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_DISPLAY_NAME,
        });
    }
    Ok(trimmed.to_string())
}

/// User profile with a favorites counter.
pub struct ProfileFeature {
    source: Arc<dyn CatalogSource>,
    favorite_count: usize,
}

impl ProfileFeature {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            favorite_count: 0,
        }
    }

    async fn load(&mut self, ctx: &Ctx) -> Result<(), HandlerError> {
        ctx.emit(ProfileState::Loading);
        let profile = self.source.fetch_profile().await?;
        let items = self.source.fetch_all().await?;
        self.favorite_count = items.iter().filter(|item| item.favorite).count();
        ctx.emit(ProfileState::Loaded {
            profile,
            favorite_count: self.favorite_count,
        });
        Ok(())
    }

    async fn update_display_name(&mut self, name: String, ctx: &Ctx) -> Result<(), HandlerError> {
        let Some(current) = ctx.current().profile().cloned() else {
            tracing::debug!("Profile not loaded, rename ignored");
            return Ok(());
        };

        let display_name = match validate_display_name(&name) {
            Ok(display_name) => display_name,
            Err(err) => {
                ctx.reject(err);
                return Ok(());
            }
        };

        let updated = UserProfile {
            display_name,
            ..current
        };
        match self.source.update_profile(updated).await {
            Ok(profile) => {
                ctx.emit(ProfileState::Loaded {
                    profile,
                    favorite_count: self.favorite_count,
                });
            }
            Err(err) => ctx.reject(err),
        }
        Ok(())
    }
}

impl Feature for ProfileFeature {
    type State = ProfileState;
    type Intent = ProfileIntent;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn initial_state(&self) -> ProfileState {
        ProfileState::Initial
    }

    fn register(registry: &mut HandlerRegistry<Self>) {
        registry
            .on(ProfileIntent::LOAD, on_load)
            .on(ProfileIntent::UPDATE_DISPLAY_NAME, on_update_display_name);
    }
}

fn on_load(feature: &mut ProfileFeature, _intent: ProfileIntent, ctx: Ctx) -> HandlerFuture<'_> {
    Box::pin(async move { feature.load(&ctx).await })
}

fn on_update_display_name(
    feature: &mut ProfileFeature,
    intent: ProfileIntent,
    ctx: Ctx,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        match intent {
            ProfileIntent::UpdateDisplayName { name } => {
                feature.update_display_name(name, &ctx).await
            }
            other => Err(HandlerError::unexpected_intent(other.tag())),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_trimmed() {
        assert_eq!(validate_display_name("  Ada  "), Ok("Ada".to_string()));
    }

    #[test]
    fn blank_display_name_is_rejected() {
        assert_eq!(validate_display_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn long_display_name_is_rejected() {
        let name = "x".repeat(MAX_DISPLAY_NAME + 1);
        assert_eq!(
            validate_display_name(&name),
            Err(ValidationError::NameTooLong {
                len: MAX_DISPLAY_NAME + 1,
                max: MAX_DISPLAY_NAME,
            })
        );
        assert!(validate_display_name(&"x".repeat(MAX_DISPLAY_NAME)).is_ok());
    }
}
