//! The well: a 10×20 grid of locked cells.
//!
//! `(x, y)` has x growing rightward from 0 and y growing downward from the
//! top row 0. A falling piece may sit partly above the well (y < 0); those
//! rows are open sky and never store anything.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const COLS: usize = BOARD_WIDTH as usize;
const ROWS: usize = BOARD_HEIGHT as usize;

/// One row of the well, left to right
pub type Row = [Cell; COLS];

/// Rows of the well, top to bottom
pub type Grid = [Row; ROWS];

const EMPTY_ROW: Row = [None; COLS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Grid,
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; ROWS],
        }
    }

    /// Grid position of (x, y), or `None` outside the well
    #[inline]
    fn slot(x: i8, y: i8) -> Option<(usize, usize)> {
        let col = usize::try_from(x).ok().filter(|&c| c < COLS)?;
        let row = usize::try_from(y).ok().filter(|&r| r < ROWS)?;
        Some((col, row))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y); `None` outside the well
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::slot(x, y).map(|(col, row)| self.rows[row][col])
    }

    /// Returns false (and writes nothing) outside the well
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        let Some((col, row)) = Self::slot(x, y) else {
            return false;
        };
        self.rows[row][col] = cell;
        true
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision check for a set of absolute cells.
    ///
    /// A cell fails if it is left of column 0, right of the last column, or
    /// below the floor. Cells above the board (y < 0) skip the occupancy
    /// check; every other cell must be empty.
    pub fn can_place(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| {
            let in_columns = usize::try_from(x).is_ok_and(|c| c < COLS);
            in_columns && y < BOARD_HEIGHT as i8 && (y < 0 || !self.is_occupied(x, y))
        })
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(Option::is_some))
    }

    /// Write `kind` into every cell of a resolved piece.
    ///
    /// Cells above the board are dropped. Returns how many cells were written.
    pub fn place(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> usize {
        cells
            .iter()
            .filter(|&&(x, y)| self.set(x, y, Some(kind)))
            .count()
    }

    /// Remove every full row and return their indices, bottom first.
    ///
    /// Surviving rows keep their order and settle onto the floor in one pass;
    /// the rows freed at the top come back empty. The grid height never
    /// changes.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared = ArrayVec::new();
        let mut floor = ROWS;

        for y in (0..ROWS).rev() {
            if self.is_row_full(y) {
                cleared.push(y);
                continue;
            }
            floor -= 1;
            if floor != y {
                self.rows[floor] = self.rows[y];
            }
        }
        self.rows[..floor].fill(EMPTY_ROW);

        cleared
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; ROWS];
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// Each row is `BOARD_WIDTH` characters: `.` is empty and a piece letter
    /// fills the cell. Fewer than `BOARD_HEIGHT` rows fill the bottom of the
    /// board. Returns `None` for a malformed row or too many rows.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["IIIIIIIII."]).unwrap();
    /// assert!(board.is_occupied(0, 19));
    /// assert!(!board.is_occupied(9, 19));
    /// ```
    pub fn from_rows(text: &[&str]) -> Option<Self> {
        let top = ROWS.checked_sub(text.len())?;
        let mut board = Self::new();

        for (line, row) in text.iter().zip(&mut board.rows[top..]) {
            if line.chars().count() != COLS {
                return None;
            }
            for (ch, cell) in line.chars().zip(row.iter_mut()) {
                *cell = match ch {
                    '.' => None,
                    letter => Some(PieceKind::from_letter(letter)?),
                };
            }
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
