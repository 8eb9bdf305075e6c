//! Classic Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `classic_tetris::{core,input,leaderboard,term,timer,types}`
//! and hosts the runner configuration.

pub mod config;

pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_leaderboard as leaderboard;
pub use classic_tetris_term as term;
pub use classic_tetris_timer as timer;
pub use classic_tetris_types as types;

pub use config::AppConfig;
