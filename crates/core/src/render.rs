//! Renderer and input seams.
//!
//! The core never touches a terminal. It reports board cell changes and
//! per-frame status through [`Renderer`], and pulls player commands from a
//! [`CommandSource`].

use anyhow::Result;

use crate::types::Command;

/// Status text announced once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

/// Draw target for the game state machine.
pub trait Renderer {
    /// Draw the frame around a `width` x `height` board. Called once at startup.
    fn draw_border(&mut self, width: u8, height: u8);

    /// Mark a board cell as filled or empty.
    fn set_cell(&mut self, x: u8, y: u8, filled: bool);

    /// Show the current score, level and line count.
    fn status(&mut self, status: &Status);

    /// Called once per cleared row, after the row is emptied and before the
    /// board is compacted. Renderers may use it to animate the clear.
    fn line_cleared(&mut self, _row: u8) {}

    /// Flush everything drawn since the last call.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Renderer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_border(&mut self, _width: u8, _height: u8) {}

    fn set_cell(&mut self, _x: u8, _y: u8, _filled: bool) {}

    fn status(&mut self, _status: &Status) {}
}

/// Non-blocking source of player commands
pub trait CommandSource {
    /// Return the next pending command, or `None` without waiting.
    fn poll(&mut self) -> Result<Option<Command>>;
}

/// Replays a fixed list of commands, one per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: std::collections::VecDeque<Option<Command>>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Option<Command>>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

impl CommandSource for ScriptedInput {
    fn poll(&mut self) -> Result<Option<Command>> {
        Ok(self.commands.pop_front().flatten())
    }
}
