//! Player module - the falling piece
//!
//! Holds the active piece's anchor, matrix and landed flag. Movement is
//! unconditional; callers check [`collides`] first. Rotation runs its own
//! wall-kick search and either commits or leaves the player untouched.

use crate::collision::collides;
use crate::pieces::Shape;
use crate::rng::PieceSource;
use crate::stage::Stage;
use crate::types::{PieceKind, STAGE_WIDTH};

/// Horizontal spawn column
pub const SPAWN_X: i8 = STAGE_WIDTH as i8 / 2 - 1;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    /// Top-left anchor of the matrix, stage column
    pub x: i8,
    /// Top-left anchor of the matrix, stage row
    pub y: i8,
    pub shape: Shape,
    /// Set for exactly the tick in which the piece locks
    pub collided: bool,
}

impl Player {
    /// Pre-game placeholder (empty matrix at the origin)
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            shape: Shape::EMPTY,
            collided: false,
        }
    }

    /// A fresh piece at the spawn position
    pub fn spawned(kind: PieceKind) -> Self {
        Self {
            x: SPAWN_X,
            y: 0,
            shape: Shape::of(kind),
            collided: false,
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.shape.kind()
    }

    /// Translate by `(dx, dy)` and set the landed flag.
    ///
    /// No legality check: `move_by(0, 0, true)` is how a piece is locked in place.
    pub fn move_by(&mut self, dx: i8, dy: i8, collided: bool) {
        self.x += dx;
        self.y += dy;
        self.collided = collided;
    }

    /// Rotate with a horizontal wall-kick search.
    ///
    /// Kick offsets are applied cumulatively in the order `+1, -2, +3, -4, ...`
    /// until the piece fits. Once the next positive offset exceeds the matrix
    /// width the rotation is rejected and `self` is left exactly as it was.
    pub fn rotate(&mut self, stage: &Stage, clockwise: bool) -> bool {
        let mut candidate = Player {
            shape: self.shape.rotated(clockwise),
            ..*self
        };

        let mut offset: i8 = 1;
        while collides(&candidate, stage, 0, 0) {
            candidate.x += offset;
            offset = -(offset + offset.signum());
            if offset > candidate.shape.size() as i8 {
                return false;
            }
        }

        *self = candidate;
        true
    }

    /// Replace with a freshly drawn piece at the spawn position
    pub fn reset(&mut self, source: &mut dyn PieceSource) {
        *self = Self::spawned(source.next_piece());
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
