use blockfall::core::{GameSettings, Round, RoundSnapshot};
use blockfall::term::{GameView, Viewport};
use blockfall::types::{Command, PieceKind, RoundPhase};

fn snapshot(seed: u64) -> RoundSnapshot {
    Round::new(GameSettings::default(), seed).snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot(1);
    let view = GameView::default();

    // 10 columns x 2 chars + border = 22 wide, 20 rows + border = 22 tall
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = snapshot(1);
    snap.board[19 * 10] = Some(PieceKind::I);
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside the border the origin is (1, 1); row 19 is line 20
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_shadow() {
    let snap = snapshot(4);
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for &(x, y) in &snap.active_cells {
        let col = 1 + y as u16 * 2;
        let line = 1 + x as u16;
        assert_eq!(fb.get(col, line).unwrap().ch, '█');
    }
    for &(x, y) in &snap.shadow_cells {
        let col = 1 + y as u16 * 2;
        let line = 1 + x as u16;
        assert_eq!(fb.get(col, line).unwrap().ch, '░');
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot(1);
    snap.score = 1234;
    snap.lines = 10;
    snap.held = Some(PieceKind::T);
    snap.message = Some("Ren 3!".to_string());

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));

    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("1234"));
    assert!(fb.contains_text("LINES"));
    assert!(fb.contains_text("HOLD"));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.contains_text("Ren 3!"));

    // Too narrow: no panel
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!fb.contains_text("SCORE"));
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut round = Round::new(GameSettings::default(), 2);
    round.toggle_pause();
    let fb = GameView::default().render(&round.snapshot(), Viewport::new(60, 24));
    assert!(fb.contains_text("PAUSED"));

    let mut snap = round.snapshot();
    snap.phase = RoundPhase::GameOver;
    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    assert!(fb.contains_text("GAME OVER"));
    assert!(!fb.contains_text("PAUSED"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let mut round = Round::new(GameSettings::default(), 8);
    let view = GameView::default();
    let mut snap = RoundSnapshot::default();
    let mut fb = blockfall::term::FrameBuffer::new(0, 0);

    round.snapshot_into(&mut snap);
    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    let first = fb.clone();

    round.enqueue_command(Command::HardDrop);
    round.tick();
    round.snapshot_into(&mut snap);
    view.render_into(&snap, Viewport::new(40, 24), &mut fb);

    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_ne!(fb, first);
}
