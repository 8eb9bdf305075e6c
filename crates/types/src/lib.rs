//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal sink, leaderboard, timer).
//!
//! # Stage Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (`STAGE_WIDTH / 2 - 1`, 0)
//!
//! # Gravity Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval when a session starts |
//! | `LEVEL_DROP_OFFSET_MS` | 200 | Added to `1000 / (level + 1)` for level-adjusted gravity |
//! | `ROWS_PER_LEVEL` | 10 | Level advances once cleared rows exceed `(level + 1) * 10` |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{Command, PieceKind, STAGE_HEIGHT, STAGE_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let command = Command::from_str("moveLeft").unwrap();
//! assert_eq!(command, Command::MoveLeft);
//!
//! assert_eq!(STAGE_WIDTH, 12);
//! assert_eq!(STAGE_HEIGHT, 20);
//! ```

/// Stage width in cells (12 columns)
pub const STAGE_WIDTH: u8 = 12;

/// Stage height in cells (20 rows)
pub const STAGE_HEIGHT: u8 = 20;

/// Gravity interval armed by `startGame` (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Constant part of the level-adjusted gravity interval
pub const LEVEL_DROP_OFFSET_MS: u32 = 200;

/// Rows needed per level step
pub const ROWS_PER_LEVEL: u32 = 10;

/// Line clear scoring table (classic per-line bonus)
///
/// Indexed by simultaneous-clear count minus one:
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_POINTS: [u32; 4] = [40, 100, 300, 1200];

/// Level-adjusted gravity interval: `1000 / (level + 1) + 200`
///
/// # Examples
///
/// ```
/// use classic_tetris_types::level_drop_interval_ms;
///
/// assert_eq!(level_drop_interval_ms(0), 1200);
/// assert_eq!(level_drop_interval_ms(1), 700);
/// assert_eq!(level_drop_interval_ms(4), 400);
/// ```
pub fn level_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS / level.saturating_add(1) + LEVEL_DROP_OFFSET_MS
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, 4-long bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All piece kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Display color as RGB
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(34, 211, 238),
            PieceKind::J => Rgb::new(37, 99, 235),
            PieceKind::L => Rgb::new(249, 115, 22),
            PieceKind::O => Rgb::new(250, 204, 21),
            PieceKind::S => Rgb::new(34, 197, 94),
            PieceKind::T => Rgb::new(147, 51, 234),
            PieceKind::Z => Rgb::new(220, 38, 38),
        }
    }
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lifetime of a cell's contents
///
/// - **Clear**: drawn by the falling piece, wiped on every redraw
/// - **Merged**: permanently locked into the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    #[default]
    Clear,
    Merged,
}

/// A cell on the stage
///
/// `kind == None` is the EMPTY tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub kind: Option<PieceKind>,
    pub status: CellStatus,
}

impl Cell {
    /// `(EMPTY, CLEAR)`
    pub const EMPTY: Cell = Cell {
        kind: None,
        status: CellStatus::Clear,
    };

    /// A transient cell drawn by the falling piece
    pub const fn clear(kind: PieceKind) -> Self {
        Self {
            kind: Some(kind),
            status: CellStatus::Clear,
        }
    }

    /// A locked cell
    pub const fn merged(kind: PieceKind) -> Self {
        Self {
            kind: Some(kind),
            status: CellStatus::Merged,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    pub fn is_merged(&self) -> bool {
        self.status == CellStatus::Merged
    }
}

/// Logical commands driving a session
///
/// These are independent of any physical key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Run one gravity step now and suspend the gravity timer
    SoftDropPress,
    /// Restore the gravity timer after a soft drop
    SoftDropRelease,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle between Playing and Paused
    TogglePause,
    /// Start a fresh session (from Start or GameOver)
    StartGame,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("softdroppress"), Some(Command::SoftDropPress));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdroppress" => Some(Command::SoftDropPress),
            "softdroprelease" => Some(Command::SoftDropRelease),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "togglepause" => Some(Command::TogglePause),
            "startgame" => Some(Command::StartGame),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropPress => "softDropPress",
            Command::SoftDropRelease => "softDropRelease",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::TogglePause => "togglePause",
            Command::StartGame => "startGame",
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Start => "start",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by the caller (leaderboard submission, sound, etc).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub rows_cleared: u32,
    pub points: u32,
    pub game_over: bool,
}
