//! Piece controller - the active piece and its move/rotate transactions.
//!
//! The active piece lives in the board while it falls. Every move or rotation
//! removes the current footprint, tests the target, and writes the footprint
//! back at either the target or the original position, so a failed attempt
//! leaves the board unchanged.

use crate::board::Board;
use crate::render::Renderer;
use crate::shapes::{Mask, ShapeTable};
use crate::types::{PieceKind, Rotation, SPAWN_X};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Create a piece at its spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X as i16,
            y: -(kind.spawn_offset() as i16),
        }
    }
}

/// Lifecycle of the controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePhase {
    /// Placed at its spawn position, not yet moved down
    Spawned,
    /// Has moved down at least once
    Falling,
    /// Committed to the board (or never placed); no piece under control
    Locked,
}

/// Owns the active piece and validates its moves against a board
#[derive(Debug, Clone)]
pub struct PieceController<'a> {
    shapes: &'a ShapeTable,
    active: Option<ActivePiece>,
    phase: PiecePhase,
}

impl<'a> PieceController<'a> {
    pub fn new(shapes: &'a ShapeTable) -> Self {
        Self {
            shapes,
            active: None,
            phase: PiecePhase::Locked,
        }
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn shapes(&self) -> &'a ShapeTable {
        self.shapes
    }

    /// Spawn `kind` at its spawn position.
    ///
    /// Returns false if the spawn footprint collides. A blocked piece is not
    /// written to the board and the controller stays locked.
    pub fn spawn<R: Renderer + ?Sized>(
        &mut self,
        kind: PieceKind,
        board: &mut Board,
        renderer: &mut R,
    ) -> bool {
        let piece = ActivePiece::spawn(kind);
        let mask = self.mask(&piece);
        if !board.can_place(piece.x, piece.y, mask) {
            self.active = None;
            self.phase = PiecePhase::Locked;
            return false;
        }

        paint(board, renderer, &piece, mask, true);
        self.active = Some(piece);
        self.phase = PiecePhase::Spawned;
        true
    }

    /// Try to shift the piece by (dx, dy)
    pub fn try_move<R: Renderer + ?Sized>(
        &mut self,
        dx: i16,
        dy: i16,
        board: &mut Board,
        renderer: &mut R,
    ) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = self.transact(
            active,
            ActivePiece {
                x: active.x + dx,
                y: active.y + dy,
                ..active
            },
            board,
            renderer,
        );
        if moved && dy > 0 {
            self.phase = PiecePhase::Falling;
        }
        moved
    }

    /// Try to rotate the piece by `delta` steps in place (no wall kicks)
    pub fn try_rotate<R: Renderer + ?Sized>(
        &mut self,
        delta: i8,
        board: &mut Board,
        renderer: &mut R,
    ) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.transact(
            active,
            ActivePiece {
                rotation: active.rotation.offset(delta),
                ..active
            },
            board,
            renderer,
        )
    }

    /// Commit the piece: its cells stay in the board and control is released.
    /// Returns the piece that was locked.
    pub fn lock(&mut self) -> Option<ActivePiece> {
        self.phase = PiecePhase::Locked;
        self.active.take()
    }

    fn mask(&self, piece: &ActivePiece) -> &'a Mask {
        self.shapes.shape(piece.kind, piece.rotation)
    }

    fn transact<R: Renderer + ?Sized>(
        &mut self,
        from: ActivePiece,
        to: ActivePiece,
        board: &mut Board,
        renderer: &mut R,
    ) -> bool {
        let from_mask = self.mask(&from);
        let to_mask = self.mask(&to);

        board.place(from.x, from.y, from_mask, false);
        if board.can_place(to.x, to.y, to_mask) {
            // Erase on screen only once the move is known to succeed.
            paint_screen(board, renderer, &from, from_mask, false);
            paint(board, renderer, &to, to_mask, true);
            self.active = Some(to);
            true
        } else {
            board.place(from.x, from.y, from_mask, true);
            false
        }
    }
}

/// Write the piece into the board and mirror it on the renderer.
fn paint<R: Renderer + ?Sized>(
    board: &mut Board,
    renderer: &mut R,
    piece: &ActivePiece,
    mask: &Mask,
    filled: bool,
) {
    board.place(piece.x, piece.y, mask, filled);
    paint_screen(board, renderer, piece, mask, filled);
}

fn paint_screen<R: Renderer + ?Sized>(
    board: &Board,
    renderer: &mut R,
    piece: &ActivePiece,
    mask: &Mask,
    filled: bool,
) {
    for (dx, dy) in mask.cells() {
        let x = piece.x + dx as i16;
        let y = piece.y + dy as i16;
        if x >= 0 && y >= 0 && x < board.width() as i16 && y < board.height() as i16 {
            renderer.set_cell(x as u8, y as u8, filled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    fn table() -> ShapeTable {
        ShapeTable::builtin().unwrap()
    }

    #[test]
    fn spawn_uses_column_3_and_offset() {
        let shapes = table();
        let mut board = Board::standard();
        let mut pieces = PieceController::new(&shapes);
        assert!(pieces.spawn(PieceKind::Z, &mut board, &mut NullRenderer));
        let active = pieces.active().unwrap();
        assert_eq!((active.x, active.y), (3, -2));
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(pieces.phase(), PiecePhase::Spawned);
        // The whole footprint starts on the top two rows.
        assert_eq!(board.occupied_count(), 4);
        for (x, y) in [(3, 0), (4, 0), (4, 1), (5, 1)] {
            assert!(board.is_occupied(x, y), "({x}, {y})");
        }
    }

    #[test]
    fn moving_down_enters_falling() {
        let shapes = table();
        let mut board = Board::standard();
        let mut pieces = PieceController::new(&shapes);
        pieces.spawn(PieceKind::T, &mut board, &mut NullRenderer);
        assert!(pieces.try_move(1, 0, &mut board, &mut NullRenderer));
        assert_eq!(pieces.phase(), PiecePhase::Spawned);
        assert!(pieces.try_move(0, 1, &mut board, &mut NullRenderer));
        assert_eq!(pieces.phase(), PiecePhase::Falling);
    }

    #[test]
    fn locked_controller_rejects_everything() {
        let shapes = table();
        let mut board = Board::standard();
        let mut pieces = PieceController::new(&shapes);
        pieces.spawn(PieceKind::T, &mut board, &mut NullRenderer);
        let locked = pieces.lock().unwrap();
        assert_eq!(locked.kind, PieceKind::T);
        assert_eq!(board.occupied_count(), 4);

        assert!(!pieces.try_move(0, 1, &mut board, &mut NullRenderer));
        assert!(!pieces.try_rotate(1, &mut board, &mut NullRenderer));
        assert!(pieces.lock().is_none());
    }
}
