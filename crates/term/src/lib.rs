//! Terminal front end for the classic rules.
//!
//! `game_view` turns a [`GameSnapshot`](crate::core::GameSnapshot) into a styled
//! framebuffer without touching the terminal; `renderer` flushes framebuffers to
//! stdout through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_leaderboard as leaderboard;
pub use classic_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{GameView, HudInfo, Viewport};
pub use renderer::{encode_rows_into, TerminalRenderer};
