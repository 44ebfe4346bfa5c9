//! Pieces module tests - rotation tables and kicks

use blockfall::core::pieces::{
    get_shape, rotation_count, rotation_states, try_kicks, KICK_OFFSETS, SPAWN_POSITION,
};
use blockfall::core::{Board, Piece};
use blockfall::types::PieceKind;

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, 0), [(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(get_shape(PieceKind::I, 1), [(0, 0), (0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_o_piece_has_one_state() {
    let only = get_shape(PieceKind::O, 0);
    assert_eq!(only, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    for rotation in 1..4 {
        assert_eq!(get_shape(PieceKind::O, rotation), only);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(get_shape(PieceKind::T, 0), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::T, 1), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 2), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 3), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_shape_index_wraps() {
    for kind in PieceKind::ALL {
        let count = rotation_count(kind);
        for rotation in 0..count {
            assert_eq!(get_shape(kind, rotation + count), get_shape(kind, rotation));
        }
    }
}

#[test]
fn test_every_kind_and_rotation_resolves_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for rotation in 0..rotation_states(kind).len() as u8 {
            let piece = Piece {
                kind,
                x: 2,
                y: 5,
                rotation,
            };
            let cells = piece.blocks();
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(cells[i], cells[j], "{:?} rotation {}", kind, rotation);
                }
            }
        }
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_position() {
    assert_eq!(SPAWN_POSITION, (3, 0));
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y, piece.rotation), (3, 0, 0));
        assert!(piece.is_valid(&Board::new()), "{:?} spawns invalid", kind);
    }
}

// ============== Kick Tests ==============

#[test]
fn test_kick_table_order() {
    assert_eq!(
        KICK_OFFSETS,
        [(1, 0), (-1, 0), (0, -1), (2, 0), (-2, 0), (0, 1)]
    );
}

#[test]
fn test_unkicked_candidate_wins_when_valid() {
    let board = Board::new();
    let rotated = Piece::spawn(PieceKind::J).shifted(0, 5).unwrap().rotated_cw();
    assert_eq!(try_kicks(rotated, |p| p.is_valid(&board)), Some(rotated));
}

#[test]
fn test_kick_away_from_left_wall() {
    let board = Board::new();
    // Flat I with its anchor one column past the left wall.
    let rotated = Piece {
        kind: PieceKind::I,
        x: -1,
        y: 5,
        rotation: 0,
    };
    let kicked = try_kicks(rotated, |p| p.is_valid(&board)).unwrap();
    assert_eq!((kicked.x, kicked.y, kicked.rotation), (0, 5, 0));
}

#[test]
fn test_upward_kick_off_stack() {
    // Only the (0, -1) kick clears the stack under the candidate.
    let board = Board::from_rows(&["IIIIIIIIII"]).unwrap();
    let rotated = Piece {
        kind: PieceKind::O,
        x: 4,
        y: 18,
        rotation: 0,
    };
    let kicked = try_kicks(rotated, |p| p.is_valid(&board)).unwrap();
    assert_eq!((kicked.x, kicked.y), (4, 17));
}

#[test]
fn test_no_kick_fits() {
    let rows = ["OOOOOOOOO."; 20];
    let board = Board::from_rows(&rows).unwrap();
    let rotated = Piece::spawn(PieceKind::T).shifted(0, 4).unwrap();
    assert_eq!(try_kicks(rotated, |p| p.is_valid(&board)), None);
}
