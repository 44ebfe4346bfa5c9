//! Pieces module - tetromino catalog and block resolution
//!
//! Each kind has an ordered list of rotation states; each state is 4 offsets
//! from the piece anchor. O has one state, I/S/Z have two, J/L/T have four.
//! Rotation walks the list modulo its length.

use crate::board::Board;
use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Offsets tried, in order, when a rotated candidate does not fit.
pub const KICK_OFFSETS: [(i8, i8); 6] = [(1, 0), (-1, 0), (0, -1), (2, 0), (-2, 0), (0, 1)];

const I_STATES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_STATES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const S_STATES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

/// All rotation states of a kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Get the shape (mino offsets) for a piece kind and rotation index
///
/// The index wraps modulo the kind's state count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// A piece instance: kind, anchor and rotation index.
///
/// Pieces are values. Movement builds a candidate with [`Piece::shifted`] or
/// [`Piece::rotated_cw`] and the engine commits it only if it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    /// Always `< rotation_count(kind)`
    pub rotation: u8,
}

impl Piece {
    /// Create a piece at the spawn anchor in rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            rotation: 0,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid cells covered by this piece
    ///
    /// Offsets are non-negative, so a saturated coordinate is always past
    /// the right wall or the floor and never validates.
    pub fn blocks(&self) -> [(i8, i8); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// The piece moved by (dx, dy), or `None` if the anchor leaves `i8` range
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }

    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % rotation_count(self.kind),
            ..*self
        }
    }

    pub fn rotated_ccw(&self) -> Self {
        let count = rotation_count(self.kind);
        Self {
            rotation: (self.rotation + count - 1) % count,
            ..*self
        }
    }

    /// Check the piece against walls, floor and locked cells
    pub fn is_valid(&self, board: &Board) -> bool {
        board.can_place(&self.blocks())
    }
}

/// Try a rotated candidate in place, then each kick offset in order.
///
/// Returns the first candidate that validates, or `None` when every
/// placement collides.
pub fn try_kicks(rotated: Piece, is_valid: impl Fn(&Piece) -> bool) -> Option<Piece> {
    if is_valid(&rotated) {
        return Some(rotated);
    }

    KICK_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| rotated.shifted(dx, dy))
        .find(|candidate| is_valid(candidate))
}
