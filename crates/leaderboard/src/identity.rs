use serde::{Deserialize, Serialize};

/// Signed-in player, supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Name to submit with a score.
///
/// A non-blank identity display name wins over whatever was typed.
pub fn leaderboard_name(identity: Option<&Identity>, typed: &str) -> String {
    match identity {
        Some(id) if !id.display_name.trim().is_empty() => id.display_name.clone(),
        _ => typed.to_string(),
    }
}
