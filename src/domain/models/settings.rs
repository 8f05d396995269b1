use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Per-user preferences, persisted as one JSON document per user through
/// the settings repository. Passed explicitly where needed, never held as
/// process-global state.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UserSettings {
    pub theme: Theme,
    pub stay_signed_in: bool,
    pub email_notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            stay_signed_in: false,
            email_notifications: true,
        }
    }
}
