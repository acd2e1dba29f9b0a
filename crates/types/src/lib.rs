//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! from the core state machine, the terminal renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! Canonical playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn column**: 3 for every piece; the spawn row depends on the kind
//!
//! # Gravity Curve
//!
//! Gravity is expressed in 60 Hz frames per row. The curve has 30 entries and
//! levels past 29 reuse the last one:
//!
//! | Level | Frames | Interval |
//! |-------|--------|----------|
//! | 0 | 48 | 800ms |
//! | 1 | 43 | ~717ms |
//! | 5 | 23 | ~383ms |
//! | 9 | 6 | 100ms |
//! | 19 | 2 | ~33ms |
//! | 29+ | 1 | ~17ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::ReverseL;
//! assert_eq!(piece.as_str(), "ReverseL");
//! assert_eq!(piece.spawn_offset(), 1);
//!
//! assert_eq!(Rotation::North.offset(-1), Rotation::West);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the piece origin on spawn
pub const SPAWN_X: i8 = 3;

/// Side length of a shape mask
pub const MASK_SIZE: usize = 4;

/// Number of rotation states per piece
pub const ROTATIONS: usize = 4;

/// Length of one gravity frame (1/60 s) in nanoseconds
pub const FRAME_NANOS: u64 = 16_666_667;

/// Gravity frames per row, indexed by `min(level, 29)`
pub const GRAVITY_FRAMES: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    1,
];

/// Highest level with its own gravity entry
pub const MAX_GRAVITY_LEVEL: u32 = (GRAVITY_FRAMES.len() - 1) as u32;

/// Gravity interval cap while soft drop is held
pub const SOFT_DROP_MS: u32 = 50;

/// How long a soft drop stays held after the last soft-drop command
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Sleep between loop iterations; paces input and rendering, not gravity
pub const FRAME_SLEEP_MS: u32 = 10;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded for every locked piece
pub const LOCK_BONUS: u32 = 100;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Line,
    L,
    ReverseL,
    S,
    Square,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Line,
        PieceKind::L,
        PieceKind::ReverseL,
        PieceKind::S,
        PieceKind::Square,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("line"), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_str("SQUARE"), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_str("j"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" => Some(PieceKind::Line),
            "l" => Some(PieceKind::L),
            "reversel" => Some(PieceKind::ReverseL),
            "s" => Some(PieceKind::S),
            "square" => Some(PieceKind::Square),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Name as used in shape record file names (`<name>Piece.txt`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "Line",
            PieceKind::L => "L",
            PieceKind::ReverseL => "ReverseL",
            PieceKind::S => "S",
            PieceKind::Square => "Square",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Rows above the visible top at which the piece spawns
    pub fn spawn_offset(&self) -> i8 {
        match self {
            PieceKind::Line | PieceKind::S | PieceKind::T => 0,
            PieceKind::L | PieceKind::ReverseL | PieceKind::Square => 1,
            PieceKind::Z => 2,
        }
    }
}

/// Rotation states, indexed 0-3
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: One step clockwise (index 1)
/// - **South**: Two steps (index 2)
/// - **West**: Three steps clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for an index, taken modulo 4
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(1), Rotation::East);
    /// assert_eq!(Rotation::from_index(6), Rotation::South);
    /// ```
    pub fn from_index(index: usize) -> Self {
        match index % ROTATIONS {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Rotate by `delta` steps (positive is clockwise)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.offset(1), Rotation::East);
    /// assert_eq!(Rotation::North.offset(-1), Rotation::West);
    /// assert_eq!(Rotation::West.offset(1), Rotation::North);
    /// ```
    pub fn offset(&self, delta: i8) -> Self {
        let steps = (delta as i32).rem_euclid(ROTATIONS as i32) as usize;
        Self::from_index(self.index() + steps)
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        self.offset(1)
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        self.offset(-1)
    }
}

/// Player commands, at most one per input poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Speed up gravity while held
    SoftDrop,
    /// Rotate piece clockwise
    RotateCw,
    /// Rotate piece counter-clockwise
    RotateCcw,
    /// End the game immediately
    Quit,
}
