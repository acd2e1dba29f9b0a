//! Terminal renderer tests - framebuffer contents after game draw calls

use std::time::{Duration, Instant};

use blockfall::core::{Game, GameOptions, Renderer, ShapeTable, Status};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer};
use blockfall::types::{Command, PieceKind};

fn cell(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).map(|c| c.ch).unwrap_or('?')
}

#[test]
fn test_start_draws_border_piece_and_status() {
    let shapes = ShapeTable::builtin().unwrap();
    let mut term = TerminalRenderer::new(10, 20, Duration::ZERO);
    let mut game = Game::new(&shapes, &GameOptions::default(), Instant::now());
    assert!(game.start_with(PieceKind::T, &mut term));

    let fb = term.frame();
    assert_eq!(cell(fb, 0, 0), '║');
    assert_eq!(cell(fb, 21, 0), '║');
    assert_eq!(cell(fb, 0, 20), '╚');
    assert_eq!(cell(fb, 21, 20), '╝');

    // T at origin (3, 0): top cell at board (4, 0), screen columns 9-10.
    assert_eq!(cell(fb, 9, 0), '█');
    assert_eq!(cell(fb, 10, 0), '█');
    assert_eq!(cell(fb, 7, 0), ' ');
    for x in 7..=12 {
        assert_eq!(cell(fb, x, 1), '█', "column {x}");
    }

    assert!(fb.row_string(0).contains("SCORE"));
    assert!(fb.row_string(3).contains("LEVEL"));
    assert!(fb.row_string(6).contains("LINES"));
}

#[test]
fn test_move_erases_old_cells() {
    let shapes = ShapeTable::builtin().unwrap();
    let mut term = TerminalRenderer::new(10, 20, Duration::ZERO);
    let t0 = Instant::now();
    let mut game = Game::new(&shapes, &GameOptions::default(), t0);
    game.start_with(PieceKind::T, &mut term);

    game.frame(Some(Command::MoveLeft), t0, &mut term);

    let fb = term.frame();
    // Board (5, 1) is now empty, (2, 1) is filled.
    assert_eq!(cell(fb, 11, 1), ' ');
    assert_eq!(cell(fb, 5, 1), '█');
    assert_eq!(cell(fb, 7, 0), '█');
    assert_eq!(cell(fb, 9, 0), ' ');
}

#[test]
fn test_status_updates_in_place() {
    let mut term = TerminalRenderer::new(10, 20, Duration::ZERO);
    term.status(&Status {
        score: 1300,
        level: 2,
        lines: 24,
    });
    term.status(&Status {
        score: 40,
        level: 2,
        lines: 24,
    });
    let row = term.frame().row_string(1);
    assert!(row.contains("40"));
    assert!(!row.contains("1300"));
    assert!(!row.contains("4000"));
}

#[test]
fn test_banner_is_centered_on_board() {
    let mut term = TerminalRenderer::new(10, 20, Duration::ZERO);
    term.draw_border(10, 20);
    term.show_banner("GAME OVER");

    let fb = term.frame();
    // Inner width 20, text width 9: starts one column in from the wall plus 5.
    assert_eq!(cell(fb, 6, 10), 'G');
    assert_eq!(cell(fb, 14, 10), 'R');
    assert_eq!(cell(fb, 0, 10), '║');
}

#[test]
fn test_view_size_fits_small_boards() {
    let view = GameView::new(7, 4);
    let (w, h) = view.frame_size();
    assert!(w >= 16);
    // Status panel is taller than a 4-row board.
    assert!(h >= 8);
}
