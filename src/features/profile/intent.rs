use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIntent {
    Load,
    UpdateDisplayName { name: String },
}

impl ProfileIntent {
    pub const LOAD: &'static str = "load";
    pub const UPDATE_DISPLAY_NAME: &'static str = "update_display_name";
}

impl Intent for ProfileIntent {
    fn tag(&self) -> &'static str {
        match self {
            Self::Load => Self::LOAD,
            Self::UpdateDisplayName { .. } => Self::UPDATE_DISPLAY_NAME,
        }
    }
}
