//! Board module - manages the game grid
//!
//! The board is a width x height grid of occupied flags (10x20 by default).
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x grows to the right and y grows downward.
//! Rows above the board (y < 0) are always passable and never stored.

use crate::shapes::Mask;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Create an empty board with the canonical 10x20 dimensions
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<bool> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, occupied: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        self.get(x, y) == Some(true)
    }

    /// Whether a mask fits with its origin at (x, y).
    ///
    /// Side walls and the floor are hard bounds. Cells above the top row only
    /// have to respect the side walls.
    pub fn can_place(&self, x: i16, y: i16, mask: &Mask) -> bool {
        mask.cells().iter().all(|&(dx, dy)| {
            let px = x + dx as i16;
            let py = y + dy as i16;
            if px < 0 || px >= self.width as i16 || py >= self.height as i16 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Write `occupied` into every on-board cell covered by the mask.
    /// Cells above the top row are skipped.
    pub fn place(&mut self, x: i16, y: i16, mask: &Mask, occupied: bool) {
        for (dx, dy) in mask.cells() {
            self.set(x + dx as i16, y + dy as i16, occupied);
        }
    }

    /// Cells of row `y`; empty if `y` is off the board.
    pub fn row(&self, y: usize) -> &[bool] {
        if y >= self.height as usize {
            return &[];
        }
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell)
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Zero out a row
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let width = self.width as usize;
        self.cells[y * width..(y + 1) * width].fill(false);
    }

    /// Shift every row above `y` down by one, overwriting row `y`.
    /// The top row becomes empty.
    pub fn collapse_above(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let width = self.width as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(false);
    }

    /// Drop the given rows in a single bottom-up pass.
    ///
    /// Surviving rows keep their relative order and settle at the bottom, and
    /// the freed rows at the top are emptied. The result does not depend on the
    /// order of `rows`.
    pub fn compact(&mut self, rows: &[usize]) {
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(false);
    }

    /// Number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Build a board from text rows, `#` marking occupied cells.
    /// Rows are right-padded with empty cells; missing rows are prepended empty.
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        let top = height as usize - rows.len().min(height as usize);
        for (i, row) in rows.iter().take(height as usize).enumerate() {
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                board.set(x as i16, (top + i) as i16, ch == '#');
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::standard();
        board.set(0, 0, true);
        board.set(5, 10, true);

        assert_eq!(board.get(0, 0), Some(true));
        assert_eq!(board.get(5, 10), Some(true));
        assert!(board.cells[0]);
        assert!(board.cells[10 * 10 + 5]);
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_compact_with_gap_row() {
        let mut board = Board::from_rows(
            4,
            5,
            &["#...", "####", ".#..", "####", "..#."],
        );
        board.compact(&[1, 3]);
        let expected = Board::from_rows(4, 5, &["....", "....", "#...", ".#..", "..#."]);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_compact_is_order_independent() {
        let start = Board::from_rows(4, 4, &["#...", "####", "####", ".#.."]);
        let mut a = start.clone();
        let mut b = start;
        a.compact(&[1, 2]);
        b.compact(&[2, 1]);
        assert_eq!(a, b);
        assert_eq!(a, Board::from_rows(4, 4, &["....", "....", "#...", ".#.."]));
    }

    #[test]
    fn test_from_rows_pads_top() {
        let board = Board::from_rows(3, 3, &["###"]);
        assert!(board.is_row_full(2));
        assert!(!board.is_row_full(0));
    }
}
