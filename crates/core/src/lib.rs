//! Core game logic module - renderer-agnostic and testable
//!
//! This module contains the game rules and the state machine that drives them.
//! It has **no dependency** on a terminal: drawing goes through the
//! [`Renderer`] trait and player input arrives through [`CommandSource`].
//!
//! # Module Structure
//!
//! - [`shapes`]: 4x4 occupancy masks per piece kind and rotation, loaded from text records
//! - [`board`]: the grid with collision checks, full-row detection and compaction
//! - [`piece`]: the active piece and its remove/test/reapply move transactions
//! - [`line_clear`]: per-lock scoring, row clearing and board compaction
//! - [`level`]: level progression and the gravity timer
//! - [`game`]: the loop that orchestrates all of the above
//! - [`rng`]: uniform seeded piece selection
//! - [`scoring`]: lock bonus and line-clear points
//!
//! # Game Rules
//!
//! - Pieces spawn at column 3, a few rows above the top depending on the kind
//! - Rotation happens in place; there are no wall kicks
//! - A piece locks as soon as a gravity tick cannot move it down
//! - Every lock scores 100, plus 40/100/300/1200 x (level + 1) for 1-4 lines
//! - The level goes up each time total lines reach (level + 1) x 10
//! - The game is lost when a new piece cannot be placed
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use blockfall_core::{Game, GameOptions, NullRenderer, ShapeTable};
//! use blockfall_core::types::{Command, PieceKind};
//!
//! let shapes = ShapeTable::builtin().unwrap();
//! let t0 = Instant::now();
//! let mut game = Game::new(&shapes, &GameOptions::default(), t0);
//! game.start_with(PieceKind::T, &mut NullRenderer);
//!
//! game.frame(Some(Command::MoveLeft), t0, &mut NullRenderer);
//! assert_eq!(game.active().unwrap().x, 2);
//!
//! // One level-0 gravity interval later the piece has fallen a row.
//! game.frame(None, t0 + Duration::from_millis(801), &mut NullRenderer);
//! assert_eq!(game.active().unwrap().y, 1);
//! ```

pub mod board;
pub mod game;
pub mod level;
pub mod line_clear;
pub mod piece;
pub mod render;
pub mod rng;
pub mod scoring;
pub mod shapes;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game::{run, Flow, Game, GameEnd, GameOptions};
pub use level::{tick_duration, GameStats, LevelTimer};
pub use line_clear::{resolve_lock, ClearReport};
pub use piece::{ActivePiece, PieceController, PiecePhase};
pub use render::{CommandSource, NullRenderer, Renderer, ScriptedInput, Status};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use shapes::{BuiltinShapes, DirShapes, Mask, ShapeSource, ShapeTable};
