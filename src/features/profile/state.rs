use serde::Serialize;

use crate::catalog::UserProfile;
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfileState {
    #[default]
    Initial,
    Loading,
    Loaded {
        profile: UserProfile,
        favorite_count: usize,
    },
    Error {
        message: String,
    },
}

impl UiState for ProfileState {
    fn error(message: String) -> Option<Self> {
        Some(Self::Error { message })
    }
}

impl ProfileState {
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Loaded { profile, .. } => Some(profile),
            _ => None,
        }
    }
}
