//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into the logical [`crate::types::Command`]s a session
//! understands. The physical layout is a [`KeyBindings`] choice; the session never
//! sees keys.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, map_key_press, map_key_release, should_quit, KeyBindings};
