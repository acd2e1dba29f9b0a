//! Terminal input module.
//!
//! Maps `crossterm` key events into [`types::Command`] and exposes them to the
//! game loop through the core [`CommandSource`] seam. Polling never blocks.

pub mod map;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall_core::CommandSource;

pub use blockfall_types as types;

pub use map::map_key;

use types::Command;

/// Reads pending key presses from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput {
    _private: (),
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandSource for TerminalInput {
    /// Drain pending events until one maps to a command.
    ///
    /// Release events are skipped; terminals that report them would otherwise
    /// double every move.
    fn poll(&mut self) -> Result<Option<Command>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(command) = map_key(key) {
                    return Ok(Some(command));
                }
            }
        }
        Ok(None)
    }
}
