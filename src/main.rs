//! Terminal runner (default binary).
//!
//! Reads key events with crossterm, feeds them to the session as commands, and
//! lets the gravity timer drive the falling piece. Most terminals never report key
//! releases, so a soft drop is also released once presses stop arriving for the
//! configured grace period.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use classic_tetris::core::{GameSnapshot, Session};
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::leaderboard::{leaderboard_name, Leaderboard};
use classic_tetris::term::{FrameBuffer, GameView, HudInfo, TerminalRenderer, Viewport};
use classic_tetris::timer::GravityTimer;
use classic_tetris::types::Command;
use classic_tetris::AppConfig;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut session = Session::new(config.seed);
    let mut timer = GravityTimer::new()?;

    let board = Leaderboard::new(&config.leaderboard_path);
    let player_name = leaderboard_name(config.identity.as_ref(), &config.player_name);
    let mut high_scores = board.scores();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let grace = Duration::from_millis(config.soft_drop_grace_ms);
    let mut last_soft_drop: Option<Instant> = None;

    loop {
        // Gravity. A level-up re-arms the timer, which drops the stale backlog.
        while timer.try_recv().is_some() {
            session.tick();
            timer.sync(session.gravity_interval_ms());
        }

        if last_soft_drop.is_some_and(|t| t.elapsed() >= grace) {
            last_soft_drop = None;
            session.apply(Command::SoftDropRelease);
            timer.sync(session.gravity_interval_ms());
        }

        if let Some(ev) = session.take_last_event() {
            if ev.game_over {
                board.add_score(&player_name, session.score());
                high_scores = board.scores();
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        let hud = HudInfo {
            player_name: &player_name,
            high_scores: &high_scores,
        };
        view.render_into(&snap, hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return Ok(());
                }
                let Some(command) = handle_key_event(config.bindings, key) else {
                    continue;
                };
                match command {
                    Command::SoftDropPress => last_soft_drop = Some(Instant::now()),
                    Command::SoftDropRelease => last_soft_drop = None,
                    _ => {}
                }
                session.apply(command);
                timer.sync(session.gravity_interval_ms());
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
