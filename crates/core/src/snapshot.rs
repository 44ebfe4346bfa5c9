use serde::Serialize;

use crate::game_state::Metrics;
use crate::pieces::Piece;
use crate::types::{Cell, Lifecycle, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: u8,
    /// Absolute cells, possibly above the board (y < 0)
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            rotation: value.rotation,
            cells: value.blocks(),
        }
    }
}

/// Read-only view of an engine between two mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Cells of the falling piece dropped to its landing row
    pub ghost: Option<[(i8, i8); 4]>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub lifecycle: Lifecycle,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub metrics: Metrics,
    pub play_time_ms: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost = None;
        self.next = PieceKind::I;
        self.held = None;
        self.can_hold = false;
        self.lifecycle = Lifecycle::Idle;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
        self.metrics = Metrics::default();
        self.play_time_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Cell at (x, y), or `None` when empty or out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    /// Number of occupied board cells
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: PieceKind::I,
            held: None,
            can_hold: false,
            lifecycle: Lifecycle::Idle,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            metrics: Metrics::default(),
            play_time_ms: 0,
        };
        s.clear();
        s
    }
}
