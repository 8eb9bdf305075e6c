//! Snapshot module - read-only view of a session for renderers
//!
//! Filled by [`crate::Session::snapshot_into`], which reuses the caller's buffer.

use crate::player::Player;
use crate::types::{Cell, PieceKind, SessionState, STAGE_HEIGHT, STAGE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: Option<PieceKind>,
    pub x: i8,
    pub y: i8,
}

impl From<Player> for ActiveSnapshot {
    fn from(value: Player) -> Self {
        Self {
            kind: value.kind(),
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer needs after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub stage: [[Cell; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub state: SessionState,
    pub score: u32,
    pub rows: u32,
    pub level: u32,
    pub gravity_ms: Option<u32>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.stage = [[Cell::EMPTY; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize];
        self.active = ActiveSnapshot::from(Player::new());
        self.state = SessionState::Start;
        self.score = 0;
        self.rows = 0;
        self.level = 0;
        self.gravity_ms = None;
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            stage: [[Cell::EMPTY; STAGE_WIDTH as usize]; STAGE_HEIGHT as usize],
            active: ActiveSnapshot::from(Player::new()),
            state: SessionState::Start,
            score: 0,
            rows: 0,
            level: 0,
            gravity_ms: None,
        }
    }
}
