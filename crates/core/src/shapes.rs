//! Shape table - 4x4 occupancy masks for every piece kind and rotation
//!
//! Shapes are plain text records, one per kind, with four lines per rotation.
//! A non-space character marks an occupied cell. The table is built once at
//! startup from a [`ShapeSource`] and shared by reference afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;
use log::{info, warn};

use crate::types::{PieceKind, Rotation, MASK_SIZE, ROTATIONS};

/// Number of lines in one shape record
pub const RECORD_LINES: usize = MASK_SIZE * ROTATIONS;

/// Occupied cells expected in every mask
pub const CELLS_PER_PIECE: usize = 4;

/// Offset of a single occupied cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// A 4x4 occupancy mask, indexed `[y][x]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Mask {
    rows: [[bool; MASK_SIZE]; MASK_SIZE],
}

impl Mask {
    pub const fn new(rows: [[bool; MASK_SIZE]; MASK_SIZE]) -> Self {
        Self { rows }
    }

    /// Whether the cell at (x, y) is occupied; out-of-range cells are empty
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < MASK_SIZE && y < MASK_SIZE && self.rows[y][x]
    }

    /// Offsets of every occupied cell, row-major
    pub fn cells(&self) -> ArrayVec<CellOffset, { MASK_SIZE * MASK_SIZE }> {
        let mut cells = ArrayVec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                if occupied {
                    cells.push((x as i8, y as i8));
                }
            }
        }
        cells
    }

    pub fn count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c).count()
    }
}

/// Provides the four rotation masks of each piece kind
pub trait ShapeSource {
    /// Short description used in log and error messages
    fn describe(&self) -> String;

    fn masks(&self, kind: PieceKind) -> Result<[Mask; ROTATIONS]>;
}

const BUILTIN_RECORDS: [(PieceKind, &str); 7] = [
    (PieceKind::Line, include_str!("../pieces/LinePiece.txt")),
    (PieceKind::L, include_str!("../pieces/LPiece.txt")),
    (PieceKind::ReverseL, include_str!("../pieces/ReverseLPiece.txt")),
    (PieceKind::S, include_str!("../pieces/SPiece.txt")),
    (PieceKind::Square, include_str!("../pieces/SquarePiece.txt")),
    (PieceKind::T, include_str!("../pieces/TPiece.txt")),
    (PieceKind::Z, include_str!("../pieces/ZPiece.txt")),
];

/// Shape records compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinShapes;

impl ShapeSource for BuiltinShapes {
    fn describe(&self) -> String {
        "built-in shapes".to_string()
    }

    fn masks(&self, kind: PieceKind) -> Result<[Mask; ROTATIONS]> {
        let (_, text) = BUILTIN_RECORDS[kind.index()];
        parse_record(text).with_context(|| format!("built-in {} record", kind.as_str()))
    }
}

/// Shape records read from `<dir>/<Kind>Piece.txt`
#[derive(Debug, Clone)]
pub struct DirShapes {
    dir: PathBuf,
}

impl DirShapes {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record_path(&self, kind: PieceKind) -> PathBuf {
        self.dir.join(format!("{}Piece.txt", kind.as_str()))
    }
}

impl ShapeSource for DirShapes {
    fn describe(&self) -> String {
        format!("shape records in {}", self.dir.display())
    }

    fn masks(&self, kind: PieceKind) -> Result<[Mask; ROTATIONS]> {
        let path = self.record_path(kind);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read shape record {}", path.display()))?;
        parse_record(&text).with_context(|| format!("invalid shape record {}", path.display()))
    }
}

/// Parse one shape record into its four rotation masks.
///
/// Missing trailing characters on a line count as empty cells. Lines past the
/// sixteenth are ignored.
pub fn parse_record(text: &str) -> Result<[Mask; ROTATIONS]> {
    let lines: Vec<&str> = text.lines().take(RECORD_LINES).collect();
    if lines.len() < RECORD_LINES {
        bail!(
            "expected {} lines ({} per rotation), found {}",
            RECORD_LINES,
            MASK_SIZE,
            lines.len()
        );
    }

    let mut masks = [Mask::default(); ROTATIONS];
    for (i, line) in lines.iter().enumerate() {
        let rotation = i / MASK_SIZE;
        let y = i % MASK_SIZE;
        for (x, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            if x >= MASK_SIZE {
                bail!(
                    "line {}: occupied cell at column {} is outside the {}x{} mask",
                    i + 1,
                    x,
                    MASK_SIZE,
                    MASK_SIZE
                );
            }
            masks[rotation].rows[y][x] = true;
        }
    }
    Ok(masks)
}

/// Immutable lookup from (kind, rotation) to mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    masks: [[Mask; ROTATIONS]; 7],
}

impl ShapeTable {
    /// Build the table from a source, requiring all 28 masks.
    pub fn load(source: &dyn ShapeSource) -> Result<Self> {
        let mut masks = [[Mask::default(); ROTATIONS]; 7];
        for kind in PieceKind::ALL {
            let rotations = source
                .masks(kind)
                .with_context(|| format!("missing shape data for {} piece", kind.as_str()))?;
            for (r, mask) in rotations.iter().enumerate() {
                if mask.count() != CELLS_PER_PIECE {
                    warn!(
                        "{} piece rotation {} has {} cells (expected {})",
                        kind.as_str(),
                        r,
                        mask.count(),
                        CELLS_PER_PIECE
                    );
                }
            }
            masks[kind.index()] = rotations;
        }
        info!("loaded {}", source.describe());
        Ok(Self { masks })
    }

    pub fn builtin() -> Result<Self> {
        Self::load(&BuiltinShapes)
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(&DirShapes::new(dir.as_ref()))
    }

    /// Mask for a kind and rotation
    pub fn shape(&self, kind: PieceKind, rotation: Rotation) -> &Mask {
        &self.masks[kind.index()][rotation.index()]
    }

    /// Mask for a kind and a raw rotation index, taken modulo 4
    pub fn shape_of(&self, kind: PieceKind, rotation: usize) -> &Mask {
        self.shape(kind, Rotation::from_index(rotation))
    }
}
