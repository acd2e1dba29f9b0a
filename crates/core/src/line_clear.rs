//! Line-clear engine - runs once per piece lock.
//!
//! Full rows are emptied, the lock and line points are added, and the board is
//! compacted in one pass so that simultaneous clears collapse correctly no
//! matter which order they were found in.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::level::GameStats;
use crate::render::Renderer;
use crate::scoring::{calculate_score, ScoreResult};

/// Most rows a single 4x4 piece can complete
pub const MAX_CLEARED_ROWS: usize = 4;

/// Outcome of resolving one lock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearReport {
    /// Cleared row indices, top to bottom
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
    pub score: ScoreResult,
}

impl ClearReport {
    pub fn lines(&self) -> usize {
        self.rows.len()
    }
}

/// Score the lock, clear full rows and compact the board.
///
/// Points use the level in effect at the moment of the lock.
pub fn resolve_lock<R: Renderer + ?Sized>(
    board: &mut Board,
    stats: &mut GameStats,
    renderer: &mut R,
) -> ClearReport {
    let mut rows = ArrayVec::new();
    for y in board.full_rows() {
        // Only pre-built boards can hold more full rows than one piece covers.
        if rows.try_push(y).is_err() {
            break;
        }
    }

    for &y in &rows {
        board.clear_row(y);
        for x in 0..board.width() {
            renderer.set_cell(x, y as u8, false);
        }
        renderer.line_cleared(y as u8);
    }

    let score = calculate_score(rows.len(), stats.level);
    stats.score = stats.score.saturating_add(score.total);
    stats.lines = stats.lines.saturating_add(rows.len() as u32);

    if let Some(&lowest) = rows.last() {
        board.compact(&rows);
        redraw_rows(board, renderer, lowest);
    }

    ClearReport { rows, score }
}

/// Push rows `0..=bottom` to the renderer.
fn redraw_rows<R: Renderer + ?Sized>(board: &Board, renderer: &mut R, bottom: usize) {
    for y in 0..=bottom {
        for (x, &filled) in board.row(y).iter().enumerate() {
            renderer.set_cell(x as u8, y as u8, filled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    #[test]
    fn no_full_rows_still_scores_lock() {
        let mut board = Board::from_rows(4, 3, &["#...", "##.."]);
        let before = board.clone();
        let mut stats = GameStats::default();
        let report = resolve_lock(&mut board, &mut stats, &mut NullRenderer);
        assert_eq!(report.lines(), 0);
        assert_eq!(stats.score, 100);
        assert_eq!(stats.lines, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn line_points_scale_with_level() {
        let mut board = Board::from_rows(4, 3, &["####"]);
        let mut stats = GameStats::new(2);
        resolve_lock(&mut board, &mut stats, &mut NullRenderer);
        assert_eq!(stats.score, 100 + 40 * 3);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn split_clears_compact_correctly() {
        let mut board = Board::from_rows(4, 6, &["..#.", "####", "#...", "####", ".##."]);
        let mut stats = GameStats::default();
        let report = resolve_lock(&mut board, &mut stats, &mut NullRenderer);
        assert_eq!(report.rows.as_slice(), &[2, 4]);
        assert_eq!(stats.score, 200);
        assert_eq!(
            board,
            Board::from_rows(4, 6, &["....", "....", "....", "..#.", "#...", ".##."])
        );
    }
}
