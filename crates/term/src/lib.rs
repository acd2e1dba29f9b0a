//! Terminal renderer for blockfall.
//!
//! Draw calls from the core land in a framebuffer; presenting diffs it against
//! the previously flushed frame and writes only what changed.
//!
//! The board is drawn two columns per cell to compensate for typical terminal
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::GameView;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
