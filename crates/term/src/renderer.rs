//! TerminalRenderer: the crossterm implementation of the core `Renderer`.
//!
//! Draw calls update an in-memory framebuffer. `present` diffs it against the
//! last flushed frame and writes only the changed runs in a single write.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::warn;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use blockfall_core::{Renderer, Status};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::GameView;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    fb: FrameBuffer,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Pause after each cleared row so the clear is visible
    clear_delay: Duration,
}

impl TerminalRenderer {
    pub fn new(board_w: u8, board_h: u8, clear_delay: Duration) -> Self {
        let view = GameView::new(board_w, board_h);
        let (w, h) = view.frame_size();
        Self {
            stdout: io::stdout(),
            view,
            fb: FrameBuffer::new(w, h),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            clear_delay,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current (not yet presented) frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Overlay centered text on the board, e.g. on game over.
    pub fn show_banner(&mut self, text: &str) {
        self.view.draw_banner(&mut self.fb, text);
    }

    /// Encode the pending frame into the internal buffer and return it.
    ///
    /// The first call after construction or a board resize encodes a full redraw.
    pub fn encode_frame(&mut self) -> Result<&[u8]> {
        self.buf.clear();
        match &mut self.last {
            Some(prev) => {
                encode_diff_into(prev, &self.fb, &mut self.buf)?;
                prev.clone_from(&self.fb);
            }
            None => {
                encode_full_into(&self.fb, &mut self.buf)?;
                self.last = Some(self.fb.clone());
            }
        }
        Ok(&self.buf)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn draw_border(&mut self, width: u8, height: u8) {
        if self.view.board_size() != (width, height) {
            self.view = GameView::new(width, height);
            let (w, h) = self.view.frame_size();
            self.fb = FrameBuffer::new(w, h);
            self.last = None;
        }
        self.view.draw_border(&mut self.fb);
    }

    fn set_cell(&mut self, x: u8, y: u8, filled: bool) {
        self.view.draw_cell(&mut self.fb, x, y, filled);
    }

    fn status(&mut self, status: &Status) {
        self.view.draw_status(&mut self.fb, status);
    }

    fn line_cleared(&mut self, row: u8) {
        if let Err(err) = self.present() {
            warn!("failed to draw cleared row {row}: {err:#}");
        }
        if !self.clear_delay.is_zero() {
            thread::sleep(self.clear_delay);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.encode_frame()?;
        self.flush_buf()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// Writes nothing when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if current_style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
