//! Terminal front end for blockfall.
//!
//! [`GameView`] turns a `GameSnapshot` into a grid of [`Glyph`]s tagged with
//! an [`Ink`]. [`TerminalRenderer`] keeps a copy of what the screen shows and
//! sends only the changed span of each row, colored by ink.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Ink};
pub use game_view::{AnchorY, GameView, ViewEffects, Viewport};
pub use renderer::{encode_changes, encode_frame, TerminalRenderer};
