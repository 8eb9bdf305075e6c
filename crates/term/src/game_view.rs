//! GameView: lays a [`GameSnapshot`] out on a framebuffer.
//!
//! Pure (no I/O), so layouts can be asserted on in unit tests.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::leaderboard::ScoreEntry;
use crate::types::{CellStatus, Rgb, SessionState, STAGE_HEIGHT, STAGE_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Things shown beside the stage that the session does not own
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo<'a> {
    pub player_name: &'a str,
    pub high_scores: &'a [ScoreEntry],
}

pub struct GameView {
    /// Terminal columns per stage cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the glyph aspect ratio
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Width of the framed stage in columns
    pub fn frame_width(&self) -> u16 {
        STAGE_WIDTH as u16 * self.cell_w + 2
    }

    pub fn frame_height(&self) -> u16 {
        STAGE_HEIGHT as u16 + 2
    }

    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: HudInfo<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let frame_w = self.frame_width();
        let frame_h = self.frame_height();
        let panel_w = 18;
        let left = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, left, top, frame_w, frame_h);
        self.draw_stage(fb, snap, left + 1, top + 1);
        self.draw_panel(fb, snap, hud, left + frame_w + 2, top);

        let banner = match snap.state {
            SessionState::Start => Some("PRESS ENTER"),
            SessionState::Paused => Some("PAUSED"),
            SessionState::GameOver => Some("GAME OVER"),
            SessionState::Playing => None,
        };
        if let Some(text) = banner {
            let w = text.chars().count() as u16;
            let x = left + frame_w.saturating_sub(w) / 2;
            let style = Style::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
            fb.put_str(x, top + frame_h / 2, text, style);
        }
    }

    pub fn render(&self, snap: &GameSnapshot, hud: HudInfo<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put(x, y, '┌', style);
        fb.put(right, y, '┐', style);
        fb.put(x, bottom, '└', style);
        fb.put(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put(cx, y, '─', style);
            fb.put(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put(x, cy, '│', style);
            fb.put(right, cy, '│', style);
        }
    }

    /// Stage cells already include the falling piece (as clear cells).
    fn draw_stage(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x0: u16, y0: u16) {
        for (y, row) in snap.stage.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell.kind {
                    Some(kind) => {
                        let style = Style::plain(kind.color(), BOARD_BG);
                        match cell.status {
                            CellStatus::Merged => ('█', style),
                            CellStatus::Clear => ('█', style.bold()),
                        }
                    }
                    None => ('·', Style::plain(Rgb::new(90, 90, 100), BOARD_BG).dim()),
                };
                let px = x0 + x as u16 * self.cell_w;
                fb.fill_rect(px, y0 + y as u16, self.cell_w, 1, ch, style);
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: HudInfo<'_>,
        x: u16,
        top: u16,
    ) {
        let label = Style::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = top;
        for (name, n) in [
            ("SCORE", snap.score),
            ("ROWS", snap.rows),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &n.to_string(), value);
            y += 3;
        }

        if !hud.player_name.is_empty() {
            fb.put_str(x, y, "PLAYER", label);
            fb.put_str(x, y + 1, hud.player_name, value);
            y += 3;
        }

        if !hud.high_scores.is_empty() {
            fb.put_str(x, y, "BEST", label);
            y += 1;
            for entry in hud.high_scores {
                fb.put_str(x, y, &format!("{:<12}{:>6}", entry.name, entry.score), value);
                y += 1;
            }
        }
    }
}
