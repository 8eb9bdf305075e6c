//! Session module - the game state machine
//!
//! Ties together the stage, the falling piece, the piece source and the progress
//! tracker, and owns the lifecycle (`Start -> Playing <-> Paused -> GameOver`) plus
//! the current gravity interval. The interval is only a number here: an external
//! timer reads [`Session::gravity_interval_ms`] after every command and re-arms
//! itself when it changes.

use crate::collision::collides;
use crate::player::Player;
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::stage::Stage;
use crate::types::*;

/// Complete session state
#[derive(Debug)]
pub struct Session {
    stage: Stage,
    player: Player,
    progress: Progress,
    state: SessionState,
    /// Gravity period in ms; `None` while gravity is suspended
    gravity_ms: Option<u32>,
    pieces: Box<dyn PieceSource>,
    /// Last lock event (consumed by observers)
    last_event: Option<CoreLastEvent>,
}

impl Session {
    /// Create a session drawing uniform random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(RandomPieces::new(seed))
    }

    /// Create a session with a custom piece source
    pub fn with_source(source: impl PieceSource + 'static) -> Self {
        Self {
            stage: Stage::new(),
            player: Player::new(),
            progress: Progress::new(),
            state: SessionState::Start,
            gravity_ms: None,
            pieces: Box::new(source),
            last_event: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn rows(&self) -> u32 {
        self.progress.rows()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Current gravity period, `None` when gravity is suspended
    pub fn gravity_interval_ms(&self) -> Option<u32> {
        self.gravity_ms
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[cfg(test)]
    pub(crate) fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.stage.write_grid(&mut out.stage);
        out.active = ActiveSnapshot::from(self.player);
        out.state = self.state;
        out.score = self.progress.score();
        out.rows = self.progress.rows();
        out.level = self.progress.level();
        out.gravity_ms = self.gravity_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    /// `Start | GameOver -> Playing` with a clean stage, a new piece and zeroed progress.
    ///
    /// Returns false (and changes nothing) from any other state.
    pub fn start_game(&mut self) -> bool {
        if !matches!(self.state, SessionState::Start | SessionState::GameOver) {
            return false;
        }

        self.stage.clear();
        self.progress.reset();
        self.last_event = None;
        self.player.reset(self.pieces.as_mut());
        self.state = SessionState::Playing;
        self.gravity_ms = Some(BASE_DROP_MS);
        self.commit_player();
        true
    }

    /// `Playing <-> Paused`. Ignored in `Start` and `GameOver`.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Paused;
                self.gravity_ms = None;
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Playing;
                self.gravity_ms = Some(level_drop_interval_ms(self.progress.level()));
                true
            }
            SessionState::Start | SessionState::GameOver => false,
        }
    }

    /// Gravity tick. Returns true if the piece moved down one row.
    ///
    /// Does nothing unless `Playing`.
    pub fn tick(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.drop_step()
    }

    /// Soft drop: suspend gravity and run one tick body now.
    pub fn soft_drop_press(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.gravity_ms = None;
        self.drop_step()
    }

    /// End of a soft drop: re-arm gravity at the level-adjusted interval.
    pub fn soft_drop_release(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.gravity_ms = Some(level_drop_interval_ms(self.progress.level()));
        true
    }

    /// Move the piece one column if the target is free
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        if collides(&self.player, &self.stage, dx, 0) {
            return false;
        }
        self.player.move_by(dx, 0, false);
        self.commit_player();
        true
    }

    /// Rotate the piece with wall kicks; a rejected rotation changes nothing
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        if !self.player.rotate(&self.stage, clockwise) {
            return false;
        }
        self.commit_player();
        true
    }

    /// Apply a logical command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_horizontal(-1),
            Command::MoveRight => self.move_horizontal(1),
            Command::SoftDropPress => self.soft_drop_press(),
            Command::SoftDropRelease => self.soft_drop_release(),
            Command::RotateCw => self.rotate(true),
            Command::RotateCcw => self.rotate(false),
            Command::TogglePause => self.toggle_pause(),
            Command::StartGame => self.start_game(),
        }
    }

    /// One gravity step: maybe level up, then fall one row or lock.
    fn drop_step(&mut self) -> bool {
        if self.progress.level_up_due() {
            self.progress.advance_level();
            // A suspended timer picks up the new level when it is re-armed.
            if self.gravity_ms.is_some() {
                self.gravity_ms = Some(level_drop_interval_ms(self.progress.level()));
            }
        }

        if !collides(&self.player, &self.stage, 0, 1) {
            self.player.move_by(0, 1, false);
            self.commit_player();
            return true;
        }

        let game_over = self.player.y < 1;
        if game_over {
            self.state = SessionState::GameOver;
            self.gravity_ms = None;
        }

        self.player.move_by(0, 0, true);
        let (rows_cleared, points) = self.commit_player();
        self.last_event = Some(CoreLastEvent {
            rows_cleared,
            points,
            game_over,
        });

        false
    }

    /// Project the player into the stage; on a lock also respawn, sweep and score.
    ///
    /// Returns `(rows_cleared, points)` for the sweep (zeros when nothing locked).
    fn commit_player(&mut self) -> (u32, u32) {
        self.stage.redraw(&self.player);

        if !self.player.collided {
            return (0, 0);
        }

        self.player.reset(self.pieces.as_mut());
        let cleared = self.stage.sweep();
        let points = self.progress.record_clear(cleared.len());

        // Draw the freshly spawned piece
        self.stage.redraw(&self.player);

        (cleared.len() as u32, points)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Shape;
    use crate::rng::ScriptedPieces;

    fn playing(source: ScriptedPieces) -> Session {
        let mut session = Session::with_source(source);
        assert!(session.start_game());
        session
    }

    /// Tick until the current piece locks
    fn drop_to_lock(session: &mut Session) {
        while session.tick() {}
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(12345);
        assert_eq!(session.state(), SessionState::Start);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rows(), 0);
        assert_eq!(session.level(), 0);
        assert_eq!(session.gravity_interval_ms(), None);
        assert_eq!(session.player().shape, Shape::EMPTY);
        assert!(session.stage().cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_start_game() {
        let mut session = Session::with_source(ScriptedPieces::repeat(PieceKind::T));
        assert!(session.start_game());

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.gravity_interval_ms(), Some(BASE_DROP_MS));
        assert_eq!(*session.player(), Player::spawned(PieceKind::T));

        // Spawned piece is drawn as CLEAR cells
        assert_eq!(session.stage().get(5, 0), Some(Cell::clear(PieceKind::T)));
        assert_eq!(
            session.stage().cells().iter().filter(|c| !c.is_empty()).count(),
            4
        );

        // Already playing: no restart
        assert!(!session.start_game());
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut session = Session::new(1);
        assert!(!session.apply(Command::MoveLeft));
        assert!(!session.apply(Command::RotateCw));
        assert!(!session.apply(Command::SoftDropPress));
        assert!(!session.apply(Command::TogglePause));
        assert!(!session.tick());
        assert_eq!(session.state(), SessionState::Start);
    }

    #[test]
    fn test_move_horizontal() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        assert!(session.apply(Command::MoveLeft));
        assert_eq!(session.player().x, 4);
        assert_eq!(session.stage().get(4, 0), Some(Cell::clear(PieceKind::O)));
        assert_eq!(session.stage().get(6, 0), Some(Cell::EMPTY));

        for _ in 0..4 {
            assert!(session.apply(Command::MoveLeft));
        }
        assert_eq!(session.player().x, 0);
        assert!(!session.apply(Command::MoveLeft));
        assert_eq!(session.player().x, 0);
    }

    #[test]
    fn test_move_blocked_by_merged_cell() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        session.stage_mut().set(4, 1, Cell::merged(PieceKind::Z));
        assert!(!session.move_horizontal(-1));
        assert_eq!(session.player().x, 5);
    }

    #[test]
    fn test_rotate_updates_stage() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::I));
        assert!(session.apply(Command::RotateCw));

        // Horizontal I on row 1, columns 5..8
        for x in 5..9 {
            assert_eq!(session.stage().get(x, 1), Some(Cell::clear(PieceKind::I)));
        }
        assert_eq!(session.stage().get(6, 0), Some(Cell::EMPTY));
    }

    #[test]
    fn test_tick_moves_down() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        assert!(session.tick());
        assert_eq!(session.player().y, 1);
        assert_eq!(session.stage().get(5, 0), Some(Cell::EMPTY));
        assert_eq!(session.stage().get(5, 2), Some(Cell::clear(PieceKind::O)));
    }

    #[test]
    fn test_lock_merges_and_respawns() {
        let mut session = playing(ScriptedPieces::new(&[PieceKind::O, PieceKind::T]));
        drop_to_lock(&mut session);

        // O locked at the floor
        assert_eq!(session.stage().get(5, 19), Some(Cell::merged(PieceKind::O)));
        assert_eq!(session.stage().get(6, 18), Some(Cell::merged(PieceKind::O)));

        // Next piece spawned and drawn
        assert_eq!(*session.player(), Player::spawned(PieceKind::T));
        assert!(!session.player().collided);
        assert_eq!(session.stage().get(5, 0), Some(Cell::clear(PieceKind::T)));

        let event = session.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 0);
        assert_eq!(event.points, 0);
        assert!(!event.game_over);
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_lock_clears_row_and_scores() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        // Row 19 full except the two columns the O will cover
        for x in 0..12 {
            if x != 5 && x != 6 {
                session.stage_mut().set(x, 19, Cell::merged(PieceKind::J));
            }
        }

        drop_to_lock(&mut session);

        assert_eq!(session.rows(), 1);
        assert_eq!(session.score(), 40);
        // Upper half of the O fell into row 19
        assert_eq!(session.stage().get(5, 19), Some(Cell::merged(PieceKind::O)));
        assert_eq!(session.stage().get(0, 19), Some(Cell::EMPTY));

        let event = session.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 1);
        assert_eq!(event.points, 40);
    }

    #[test]
    fn test_tetris_scores_1200() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::I));
        // Bottom four rows full except column 6 (the vertical I's column)
        for y in 16..20 {
            for x in 0..12 {
                if x != 6 {
                    session.stage_mut().set(x, y, Cell::merged(PieceKind::L));
                }
            }
        }

        drop_to_lock(&mut session);

        assert_eq!(session.rows(), 4);
        assert_eq!(session.score(), 1200);
        assert!(session
            .stage()
            .cells()
            .iter()
            .all(|c| !c.is_merged()));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::T));

        assert!(session.apply(Command::TogglePause));
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.gravity_interval_ms(), None);

        // Nothing moves while paused
        let before = *session.player();
        assert!(!session.tick());
        assert!(!session.apply(Command::MoveLeft));
        assert!(!session.apply(Command::RotateCw));
        assert_eq!(*session.player(), before);

        // Resume uses the level-adjusted interval, not the base one
        assert!(session.apply(Command::TogglePause));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.gravity_interval_ms(), Some(1200));
    }

    #[test]
    fn test_level_up_on_tick() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::T));
        session.progress = Progress::with_totals(440, 11, 0);

        session.tick();

        assert_eq!(session.level(), 1);
        assert_eq!(session.gravity_interval_ms(), Some(700));

        // One level per tick, and only past the threshold
        session.tick();
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_exactly_ten_rows_does_not_level_up() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::T));
        session.progress = Progress::with_totals(400, 10, 0);
        session.tick();
        assert_eq!(session.level(), 0);
        assert_eq!(session.gravity_interval_ms(), Some(BASE_DROP_MS));
    }

    #[test]
    fn test_soft_drop_suspends_and_restores_gravity() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::T));

        assert!(session.apply(Command::SoftDropPress));
        assert_eq!(session.player().y, 1);
        assert_eq!(session.gravity_interval_ms(), None);

        // Key repeat keeps dropping
        assert!(session.apply(Command::SoftDropPress));
        assert_eq!(session.player().y, 2);

        assert!(session.apply(Command::SoftDropRelease));
        assert_eq!(session.gravity_interval_ms(), Some(1200));
    }

    #[test]
    fn test_level_up_during_soft_drop_waits_for_release() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::T));
        session.progress = Progress::with_totals(0, 11, 0);

        session.apply(Command::SoftDropPress);
        assert_eq!(session.level(), 1);
        assert_eq!(session.gravity_interval_ms(), None);

        session.apply(Command::SoftDropRelease);
        assert_eq!(session.gravity_interval_ms(), Some(700));
    }

    #[test]
    fn test_game_over_when_locking_at_top() {
        // O pieces stacked in columns 5-6: the 10th locks at y = 0
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));

        for _ in 0..9 {
            drop_to_lock(&mut session);
            assert_eq!(session.state(), SessionState::Playing);
            assert!(!session.take_last_event().unwrap().game_over);
        }

        assert!(!session.tick());
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.gravity_interval_ms(), None);
        assert!(session.take_last_event().unwrap().game_over);

        // Top piece was merged
        assert_eq!(session.stage().get(5, 0), Some(Cell::merged(PieceKind::O)));

        // Frozen until restarted
        assert!(!session.tick());
        assert!(!session.apply(Command::TogglePause));
        assert!(!session.apply(Command::MoveLeft));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        session.progress = Progress::with_totals(1000, 12, 1);
        session.state = SessionState::GameOver;
        session.gravity_ms = None;
        session.stage_mut().set(0, 19, Cell::merged(PieceKind::O));

        assert!(session.apply(Command::StartGame));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rows(), 0);
        assert_eq!(session.level(), 0);
        assert_eq!(session.gravity_interval_ms(), Some(BASE_DROP_MS));
        assert_eq!(session.stage().get(0, 19), Some(Cell::EMPTY));
    }

    #[test]
    fn test_lock_below_top_is_not_game_over() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::O));
        // Blocker under the spawn position leaves the O locking at y = 1
        session.stage_mut().set(5, 3, Cell::merged(PieceKind::Z));

        assert!(session.tick());
        assert_eq!(session.player().y, 1);
        assert!(!session.tick());
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_never_left_colliding_after_successful_move() {
        for seed in 1..20u32 {
            let mut session = Session::new(seed);
            session.start_game();
            let mut rng = crate::rng::SimpleRng::new(seed.wrapping_mul(31));

            for _ in 0..2000 {
                if session.state() != SessionState::Playing {
                    session.start_game();
                }
                let moved = match rng.next_range(5) {
                    0 => session.apply(Command::MoveLeft),
                    1 => session.apply(Command::MoveRight),
                    2 => session.apply(Command::RotateCw),
                    3 => session.apply(Command::RotateCcw),
                    _ => {
                        session.tick();
                        false
                    }
                };
                if moved {
                    assert!(!collides(session.player(), session.stage(), 0, 0));
                }
                assert_eq!(session.stage().rows().count(), STAGE_HEIGHT as usize);
            }
        }
    }

    #[test]
    fn test_snapshot() {
        let mut session = playing(ScriptedPieces::repeat(PieceKind::S));
        session.tick();

        let snap = session.snapshot();
        assert_eq!(snap.state, SessionState::Playing);
        assert!(snap.playable());
        assert_eq!(snap.active.kind, Some(PieceKind::S));
        assert_eq!(snap.active.y, 1);
        assert_eq!(snap.gravity_ms, Some(BASE_DROP_MS));
        assert_eq!(snap.stage[1][6], Cell::clear(PieceKind::S));
    }
}
