use classic_tetris::core::{GameSnapshot, ScriptedPieces, Session};
use classic_tetris::term::{encode_rows_into, GameView, HudInfo, Viewport};
use classic_tetris::types::{Cell, Command, PieceKind, SessionState};

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();
    // 12 cells * 2 columns + border, no room for the side panel
    let vp = Viewport::new(26, 22);
    let fb = view.render(&GameSnapshot::default(), HudInfo::default(), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(25, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(25, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_merged_cell_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.stage[19][0] = Cell::merged(PieceKind::I);

    let fb = GameView::default().render(&snap, HudInfo::default(), Viewport::new(26, 22));

    let y = 1 + 19;
    assert_eq!(fb.get(1, y).unwrap().ch, '█');
    assert_eq!(fb.get(2, y).unwrap().ch, '█');
    assert_eq!(fb.get(1, y).unwrap().style.fg, PieceKind::I.color());
    assert_eq!(fb.get(3, y).unwrap().ch, '·');
}

#[test]
fn term_view_banner_follows_state() {
    let mut session = Session::with_source(ScriptedPieces::repeat(PieceKind::T));
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let text = |snap: &GameSnapshot| {
        let fb = view.render(snap, HudInfo::default(), vp);
        (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n")
    };

    assert!(text(&session.snapshot()).contains("PRESS ENTER"));

    session.apply(Command::StartGame);
    session.apply(Command::TogglePause);
    assert_eq!(session.state(), SessionState::Paused);
    assert!(text(&session.snapshot()).contains("PAUSED"));
}

#[test]
fn renderer_only_rewrites_changed_rows() {
    let mut session = Session::with_source(ScriptedPieces::repeat(PieceKind::O));
    session.apply(Command::StartGame);

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let before = view.render(&session.snapshot(), HudInfo::default(), vp);
    session.apply(Command::MoveLeft);
    let after = view.render(&session.snapshot(), HudInfo::default(), vp);

    let mut out = Vec::new();
    // The O piece covers two stage rows
    assert_eq!(encode_rows_into(Some(&before), &after, &mut out).unwrap(), 2);
}
