//! Shape table tests - built-in records and on-disk record directories

use std::fs;

use blockfall::core::{Board, BuiltinShapes, DirShapes, ShapeSource, ShapeTable};
use blockfall::types::{PieceKind, Rotation};

#[test]
fn test_every_mask_has_four_cells() {
    let shapes = ShapeTable::builtin().unwrap();
    for kind in PieceKind::ALL {
        for r in 0..4 {
            assert_eq!(shapes.shape_of(kind, r).count(), 4, "{kind:?} rotation {r}");
        }
    }
}

#[test]
fn test_every_rotation_fits_at_spawn_column() {
    let shapes = ShapeTable::builtin().unwrap();
    let board = Board::standard();
    for kind in PieceKind::ALL {
        for r in 0..4 {
            assert!(board.can_place(3, 0, shapes.shape_of(kind, r)), "{kind:?} rotation {r}");
        }
    }
}

#[test]
fn test_square_is_rotation_invariant() {
    let shapes = ShapeTable::builtin().unwrap();
    let north = shapes.shape(PieceKind::Square, Rotation::North);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(shapes.shape(PieceKind::Square, rotation), north);
    }
}

#[test]
fn test_full_turn_returns_to_start() {
    let shapes = ShapeTable::builtin().unwrap();
    for kind in PieceKind::ALL {
        let mut rotation = Rotation::North;
        for _ in 0..4 {
            rotation = rotation.rotate_cw();
        }
        assert_eq!(shapes.shape(kind, rotation), shapes.shape(kind, Rotation::North));
    }
}

#[test]
fn test_dir_shapes_match_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirShapes::new(dir.path());
    for kind in PieceKind::ALL {
        let record = fs::read_to_string(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("crates/core/pieces")
                .join(format!("{}Piece.txt", kind.as_str())),
        )
        .unwrap();
        fs::write(source.record_path(kind), record).unwrap();
    }

    let from_dir = ShapeTable::from_dir(dir.path()).unwrap();
    let builtin = ShapeTable::builtin().unwrap();
    for kind in PieceKind::ALL {
        for r in 0..4 {
            assert_eq!(from_dir.shape_of(kind, r), builtin.shape_of(kind, r));
        }
    }
}

#[test]
fn test_dir_shapes_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ShapeTable::from_dir(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Piece.txt"), "{err:#}");
}

#[test]
fn test_dir_shapes_short_record_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirShapes::new(dir.path());
    fs::write(source.record_path(PieceKind::Line), "####\n").unwrap();

    let err = source.masks(PieceKind::Line).unwrap_err();
    assert!(format!("{err:#}").contains("expected 16 lines"), "{err:#}");
}

#[test]
fn test_record_paths_use_kind_names() {
    let source = DirShapes::new("pieces");
    assert!(source.record_path(PieceKind::ReverseL).ends_with("ReverseLPiece.txt"));
    assert!(BuiltinShapes.describe().contains("built-in"));
}

#[test]
fn test_spawn_footprint_is_on_the_board() {
    let shapes = ShapeTable::builtin().unwrap();
    for kind in PieceKind::ALL {
        let mask = shapes.shape(kind, Rotation::North);
        let top = -(kind.spawn_offset() as i16);
        for (_, dy) in mask.cells() {
            assert!(top + dy as i16 >= 0, "{kind:?} starts above the board");
        }
    }
}
