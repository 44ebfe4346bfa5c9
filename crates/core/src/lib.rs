//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminals or I/O: every time-dependent operation
//! takes a millisecond timestamp from the caller, so the same timestamps and
//! the same piece source replay the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: The engine: lifecycle, movement, gravity, hold, scoring
//! - [`pieces`]: Tetromino rotation tables and the kick sequence
//! - [`repeat`]: Held-direction repeat throttling
//! - [`rng`]: Piece sources (uniform random, fixed cycle)
//! - [`scoring`]: Line and hard-drop points, level and drop cadence
//! - [`snapshot`]: Copyable read-only view for renderers and tooling
//! - [`config`]: Environment-driven configuration
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each `next` is an independent draw over seven kinds
//! - **Simple rotation**: fixed state tables with six kick offsets tried in order
//! - **Immediate lock**: a blocked downward step locks the piece at once
//! - **Ghost piece**: shows where the current piece will land
//! - **Hold**: store one piece for later use (once per piece)
//! - **Scoring**: classic Nintendo table times level, plus 2 points per hard-drop row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::{Direction, GameCommand};
//!
//! let mut game = GameState::new(&GameConfig::default());
//! assert!(game.start(0));
//!
//! game.apply(GameCommand::Move(Direction::Right), 0);
//! game.apply(GameCommand::Rotate, 0);
//! game.apply(GameCommand::HardDrop, 0);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Drivers call [`GameState::tick`](game_state::GameState::tick) every frame
//! (16ms by default). Gravity fires once `now - last_drop` reaches the level's
//! drop interval: 800ms at level 1, one frame (16ms) from level 11 on.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod repeat;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameState, Metrics};
pub use pieces::{get_shape, try_kicks, Piece};
pub use repeat::DirectionalRepeat;
pub use rng::{CyclePieces, PieceSource, SimpleRng, UniformPieces};
pub use scoring::{calculate_hard_drop_score, calculate_line_score, drop_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
