//! Shared vocabulary of the blockfall workspace.
//!
//! Constants and plain-data types used by the engine, input mapping and
//! rendering alike.
//!
//! The well is 10 columns by 20 rows with row 0 at the top. Pieces spawn
//! with their anchor at (3, 0) in rotation 0.
//!
//! | Timing (ms) | Value | Meaning |
//! |---|---|---|
//! | `TICK_MS` | 16 | Default driver frame interval (~60 FPS) |
//! | `HORIZONTAL_REPEAT_MS` | 100 | Minimum interval between held left/right steps |
//! | `SOFT_DROP_REPEAT_MS` | 50 | Minimum interval between held soft-drop steps |
//! | `LINE_CLEAR_FLASH_MS` | 180 | Cosmetic flash after a line clear |
//!
//! # Drop Cadence
//!
//! Gravity is expressed in frames at 60 FPS:
//! `frames = max(1, 48 - (level - 1) * 5)`, so level 1 drops every 48 frames
//! (800ms) and level 11+ drops every frame.
//!
//! ```
//! use blockfall_types::{Direction, GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let cmd = GameCommand::from_str("hardDrop").unwrap();
//! assert_eq!(cmd, GameCommand::HardDrop);
//! assert_eq!(GameCommand::from_str("left"), Some(GameCommand::Move(Direction::Left)));
//!
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Columns in the well
pub const BOARD_WIDTH: u8 = 10;

/// Rows in the well
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Default driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Frames per second the drop cadence is expressed in
pub const FRAMES_PER_SECOND: u32 = 60;

/// Frames per gravity step at level 1
pub const BASE_FRAMES_PER_DROP: u32 = 48;

/// Frames removed from the gravity step per level gained
pub const FRAMES_PER_LEVEL_STEP: u32 = 5;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Minimum interval between repeated left/right steps while held
pub const HORIZONTAL_REPEAT_MS: u32 = 100;

/// Minimum interval between repeated soft-drop steps while held
pub const SOFT_DROP_REPEAT_MS: u32 = 50;

/// Cosmetic flash duration after a line clear (presentation only)
pub const LINE_CLEAR_FLASH_MS: u32 = 180;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Points for clearing `n` rows at once (index `n`, capped at 4), before the
/// level multiplier
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino kinds, named after the letter each resembles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Kind named by a letter, either case
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.letter().eq_ignore_ascii_case(&letter))
    }

    /// Parse a one-letter kind name, either case
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("oo"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        const NAMES: [&str; 7] = ["I", "J", "L", "O", "S", "T", "Z"];
        NAMES[self.index()]
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Directions a falling piece can be moved by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    /// Soft drop
    Down,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Down];

    /// Grid delta applied by one step in this direction
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Down => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Commands delivered by an input source.
///
/// Directional input comes either as a `Press`/`Release` pair (throttled
/// repeats while held) or as a single-shot `Move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    /// Direction key went down; repeats on tick until released
    Press(Direction),
    /// Direction key came up
    Release(Direction),
    /// One unthrottled step
    Move(Direction),
    /// Rotate to the next rotation state
    Rotate,
    /// Rotate to the previous rotation state
    RotateCcw,
    /// Drop to the landing row and lock
    HardDrop,
    /// Swap the falling piece with the held slot
    Hold,
    /// Toggle between running and paused
    PauseToggle,
    /// Leave the idle state
    Start,
    /// Re-initialize the session and start again
    Reset,
}

impl GameCommand {
    /// Parse a single-shot command from string (case-insensitive)
    ///
    /// Directional names map to [`GameCommand::Move`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Direction, GameCommand};
    ///
    /// assert_eq!(GameCommand::from_str("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("down"), Some(GameCommand::Move(Direction::Down)));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "moveleft" => Some(GameCommand::Move(Direction::Left)),
            "right" | "moveright" => Some(GameCommand::Move(Direction::Right)),
            "down" | "softdrop" => Some(GameCommand::Move(Direction::Down)),
            "rotate" | "rotatecw" => Some(GameCommand::Rotate),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "harddrop" => Some(GameCommand::HardDrop),
            "hold" => Some(GameCommand::Hold),
            "pause" => Some(GameCommand::PauseToggle),
            "start" => Some(GameCommand::Start),
            "reset" | "restart" => Some(GameCommand::Reset),
            _ => None,
        }
    }
}

/// Session lifecycle.
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver` on spawn failure,
/// and `reset` returns any state to `Running` with a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Idle => "idle",
            Lifecycle::Running => "running",
            Lifecycle::Paused => "paused",
            Lifecycle::GameOver => "game_over",
        }
    }
}

/// Event emitted after a piece locks.
///
/// Drivers use it to trigger cosmetic effects; the logical board has
/// already been updated when this is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    pub level_up: bool,
    /// The follow-up spawn failed
    pub game_over: bool,
}

/// A well cell: empty, or locked with the kind that filled it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_timing_defaults() {
        assert_eq!(BASE_FRAMES_PER_DROP, 48);
        assert_eq!(FRAMES_PER_LEVEL_STEP, 5);
        assert_eq!(FRAMES_PER_SECOND, 60);
        assert_eq!(HORIZONTAL_REPEAT_MS, 100);
        assert_eq!(SOFT_DROP_REPEAT_MS, 50);
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }

    #[test]
    fn piece_kind_parse_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
        assert_eq!(PieceKind::from_letter('s'), Some(PieceKind::S));
        assert_eq!(PieceKind::Z.index(), 6);
    }

    #[test]
    fn command_parse_covers_directions() {
        assert_eq!(
            GameCommand::from_str("moveRight"),
            Some(GameCommand::Move(Direction::Right))
        );
        assert_eq!(
            GameCommand::from_str("softDrop"),
            Some(GameCommand::Move(Direction::Down))
        );
        assert_eq!(GameCommand::from_str("PAUSE"), Some(GameCommand::PauseToggle));
        assert_eq!(GameCommand::from_str("jump"), None);
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Down.delta(), (0, 1));
    }
}
