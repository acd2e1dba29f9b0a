//! Scoring module - lock bonus and classic line-clear points

use crate::types::{LINE_SCORES, LOCK_BONUS};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Flat bonus for locking the piece
    pub lock_bonus: u32,
    /// Level-scaled points for the cleared lines
    pub line_clear_score: u32,
    pub total: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Calculate the complete score for a lock that cleared `lines` rows.
pub fn calculate_score(lines: usize, level: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    ScoreResult {
        lock_bonus: LOCK_BONUS,
        line_clear_score,
        total: LOCK_BONUS.saturating_add(line_clear_score),
    }
}
