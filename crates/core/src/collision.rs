//! Collision resolver - the single legality check for moves, drops and rotations

use crate::player::Player;
use crate::stage::Stage;
use crate::types::{STAGE_HEIGHT, STAGE_WIDTH};

/// Would `player`, shifted by `(dx, dy)`, overlap a wall, the floor, or a merged cell?
///
/// There is no check above the stage: cells with negative `y` are legal so that a
/// piece may hang over the top while it spawns.
pub fn collides(player: &Player, stage: &Stage, dx: i8, dy: i8) -> bool {
    player.shape.occupied().any(|(px, py, _)| {
        let x = player.x + px + dx;
        let y = player.y + py + dy;

        if x < 0 || x >= STAGE_WIDTH as i8 || y >= STAGE_HEIGHT as i8 {
            return true;
        }

        stage.is_merged(x, y)
    })
}
