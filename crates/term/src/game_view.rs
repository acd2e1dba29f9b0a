//! GameView: maps board cells and status into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::Status;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Columns between the right wall and the status panel
const PANEL_GAP: u16 = 3;

/// Width reserved for status labels and values
const PANEL_WIDTH: u16 = 12;

/// Rows used by the status panel
const PANEL_ROWS: u16 = 8;

const BLOCK: char = '█';

/// Layout of the board, its border and the status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    board_w: u8,
    board_h: u8,
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl GameView {
    pub fn new(board_w: u8, board_h: u8) -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            board_w,
            board_h,
            cell_w: 2,
        }
    }

    /// Board width and height this view lays out
    pub fn board_size(&self) -> (u8, u8) {
        (self.board_w, self.board_h)
    }

    /// Framebuffer size needed for the whole view
    pub fn frame_size(&self) -> (u16, u16) {
        let width = self.right_wall() + 1 + PANEL_GAP + PANEL_WIDTH;
        let height = (self.board_h as u16 + 1).max(PANEL_ROWS);
        (width, height)
    }

    fn right_wall(&self) -> u16 {
        1 + self.board_w as u16 * self.cell_w
    }

    fn panel_x(&self) -> u16 {
        self.right_wall() + 1 + PANEL_GAP
    }

    /// Terminal position of the left half of board cell (x, y)
    pub fn cell_origin(&self, x: u8, y: u8) -> (u16, u16) {
        (1 + x as u16 * self.cell_w, y as u16)
    }

    /// Walls on every board row and a floor below the last one.
    pub fn draw_border(&self, fb: &mut FrameBuffer) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200));
        let right = self.right_wall();
        let floor = self.board_h as u16;

        for y in 0..floor {
            fb.put_char(0, y, '║', style);
            fb.put_char(right, y, '║', style);
        }
        fb.put_char(0, floor, '╚', style);
        for x in 1..right {
            fb.put_char(x, floor, '═', style);
        }
        fb.put_char(right, floor, '╝', style);
    }

    pub fn draw_cell(&self, fb: &mut FrameBuffer, x: u8, y: u8, filled: bool) {
        if x >= self.board_w || y >= self.board_h {
            return;
        }
        let (px, py) = self.cell_origin(x, y);
        let (ch, style) = if filled {
            (BLOCK, CellStyle::fg(Rgb::new(80, 220, 220)))
        } else {
            (' ', CellStyle::default())
        };
        fb.fill_run(px, py, self.cell_w, ch, style);
    }

    pub fn draw_status(&self, fb: &mut FrameBuffer, status: &Status) {
        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let x = self.panel_x();

        let rows = [
            ("SCORE", status.score),
            ("LEVEL", status.level),
            ("LINES", status.lines),
        ];
        for (i, (name, v)) in rows.into_iter().enumerate() {
            let y = i as u16 * 3;
            fb.put_str(x, y, name, label);
            fb.fill_run(x, y + 1, PANEL_WIDTH, ' ', value);
            fb.put_u32(x, y + 1, v, value);
        }
    }

    /// Centered text over the middle board row.
    pub fn draw_banner(&self, fb: &mut FrameBuffer, text: &str) {
        let inner = self.board_w as u16 * self.cell_w;
        let text_w = text.chars().count() as u16;
        let x = 1 + inner.saturating_sub(text_w) / 2;
        let y = self.board_h as u16 / 2;
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, y, text, style);
    }
}
