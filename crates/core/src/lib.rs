//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the simulation: the stage, the falling piece, collision and
//! rotation resolution, row sweeping, scoring and the session state machine.
//! It has **zero dependencies** on terminals, timers, or storage, making it:
//!
//! - **Deterministic**: Same seed (or script) produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Driven by any timer and any input source
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino catalog and matrix rotation
//! - [`rng`]: Uniform random and scripted piece sources
//! - [`collision`]: The single legality check for every move
//! - [`stage`]: 12x20 grid with overlay redraw and row sweeping
//! - [`player`]: Falling piece with wall-kick rotation
//! - [`scoring`]: Score, cleared rows and level
//! - [`session`]: Start/Playing/Paused/GameOver state machine and gravity interval
//! - [`snapshot`]: Read-only view for renderers
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::Session;
//! use classic_tetris_types::{Command, SessionState};
//!
//! let mut session = Session::new(12345);
//! session.apply(Command::StartGame);
//! assert_eq!(session.state(), SessionState::Playing);
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::RotateCw);
//!
//! // Gravity timer fired
//! session.tick();
//!
//! assert_eq!(session.score(), 0);
//! assert_eq!(session.gravity_interval_ms(), Some(1000));
//! ```
//!
//! # Timing
//!
//! The session does not keep time. It exposes the current gravity period through
//! [`Session::gravity_interval_ms`]; whoever owns the timer calls
//! [`Session::tick`] when it fires and re-arms on every change of period.

pub mod collision;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod stage;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use pieces::Shape;
pub use player::Player;
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};
pub use scoring::{calculate_line_score, Progress};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stage::Stage;
