//! Runner configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::input::KeyBindings;
use crate::leaderboard::{Identity, Leaderboard, DEFAULT_NAME};

/// Runner configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Piece RNG seed
    pub seed: u32,
    pub bindings: KeyBindings,
    pub leaderboard_path: PathBuf,
    /// Name typed for leaderboard submissions
    pub player_name: String,
    /// Signed-in identity, overrides `player_name` when present
    pub identity: Option<Identity>,
    /// How long after the last soft-drop press before a release is assumed
    pub soft_drop_grace_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            bindings: KeyBindings::default(),
            leaderboard_path: Leaderboard::default_path(),
            player_name: DEFAULT_NAME.to_string(),
            identity: None,
            soft_drop_grace_ms: 150,
        }
    }
}

impl AppConfig {
    /// Read `TETRIS_*` variables, falling back to defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let bindings = non_empty("TETRIS_KEYS")
            .and_then(|s| KeyBindings::from_str(&s))
            .unwrap_or(defaults.bindings);

        let leaderboard_path = non_empty("TETRIS_LEADERBOARD_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.leaderboard_path);

        let player_name = non_empty("TETRIS_PLAYER_NAME").unwrap_or(defaults.player_name);

        let identity = non_empty("TETRIS_IDENTITY_NAME").map(|name| {
            let id = Identity::new(name);
            match non_empty("TETRIS_IDENTITY_AVATAR") {
                Some(url) => id.with_avatar(url),
                None => id,
            }
        });

        let soft_drop_grace_ms = non_empty("TETRIS_SOFT_DROP_GRACE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.soft_drop_grace_ms);

        Self {
            seed,
            bindings,
            leaderboard_path,
            player_name,
            identity,
            soft_drop_grace_ms,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.bindings, KeyBindings::Wasd);
        assert_eq!(config.leaderboard_path, Leaderboard::default_path());
        assert_eq!(config.player_name, DEFAULT_NAME);
        assert!(config.identity.is_none());
        assert_eq!(config.soft_drop_grace_ms, 150);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_KEYS", "arrows"),
            ("TETRIS_LEADERBOARD_PATH", "/tmp/lb.json"),
            ("TETRIS_PLAYER_NAME", " ada "),
            ("TETRIS_IDENTITY_NAME", "Ada L."),
            ("TETRIS_IDENTITY_AVATAR", "https://example.invalid/ada.png"),
            ("TETRIS_SOFT_DROP_GRACE_MS", "300"),
        ]);
        assert_eq!(config.seed, 42);
        assert_eq!(config.bindings, KeyBindings::Arrows);
        assert_eq!(config.leaderboard_path, PathBuf::from("/tmp/lb.json"));
        assert_eq!(config.player_name, "ada");
        let id = config.identity.unwrap();
        assert_eq!(id.display_name, "Ada L.");
        assert_eq!(id.avatar_url.as_deref(), Some("https://example.invalid/ada.png"));
        assert_eq!(config.soft_drop_grace_ms, 300);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config(&[
            ("TETRIS_KEYS", "joystick"),
            ("TETRIS_SOFT_DROP_GRACE_MS", "soon"),
            ("TETRIS_IDENTITY_NAME", "   "),
        ]);
        assert_eq!(config.bindings, KeyBindings::Wasd);
        assert_eq!(config.soft_drop_grace_ms, 150);
        assert!(config.identity.is_none());
    }
}
