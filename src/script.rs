//! Command scripts for headless play.
//!
//! A script is a list of whitespace-separated tokens:
//!
//! - a command name as accepted by [`GameCommand::from_str`] (`left`,
//!   `rotate`, `hardDrop`, `hold`, `pause`, `reset`, ...), applied at the
//!   current clock;
//! - `press:<dir>` / `release:<dir>` for held movement (`left`, `right`, `down`);
//! - `tick:<ms>` to advance the clock by `ms`, ticking the engine every frame.
//!
//! ```
//! use blockfall::script::{parse_script, ScriptStep};
//! use blockfall::types::{Direction, GameCommand};
//!
//! let steps = parse_script(["left", "press:down", "tick:100"]).unwrap();
//! assert_eq!(
//!     steps,
//!     vec![
//!         ScriptStep::Command(GameCommand::Move(Direction::Left)),
//!         ScriptStep::Command(GameCommand::Press(Direction::Down)),
//!         ScriptStep::Wait(100),
//!     ]
//! );
//! ```

use thiserror::Error;

use crate::core::{GameState, PieceSource};
use crate::types::{Direction, GameCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Command(GameCommand),
    /// Advance the clock by this many milliseconds
    Wait(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("unknown direction in {0:?}")]
    UnknownDirection(String),
    #[error("invalid duration in {0:?}")]
    InvalidDuration(String),
}

pub fn parse_token(token: &str) -> Result<ScriptStep, ScriptError> {
    if let Some((head, arg)) = token.split_once(':') {
        return match head.to_ascii_lowercase().as_str() {
            "tick" | "wait" => arg
                .parse()
                .map(ScriptStep::Wait)
                .map_err(|_| ScriptError::InvalidDuration(token.to_string())),
            "press" => parse_direction(token, arg)
                .map(|dir| ScriptStep::Command(GameCommand::Press(dir))),
            "release" => parse_direction(token, arg)
                .map(|dir| ScriptStep::Command(GameCommand::Release(dir))),
            _ => Err(ScriptError::UnknownCommand(token.to_string())),
        };
    }

    GameCommand::from_str(token)
        .map(ScriptStep::Command)
        .ok_or_else(|| ScriptError::UnknownCommand(token.to_string()))
}

fn parse_direction(token: &str, arg: &str) -> Result<Direction, ScriptError> {
    Direction::ALL
        .into_iter()
        .find(|dir| dir.as_str().eq_ignore_ascii_case(arg))
        .ok_or_else(|| ScriptError::UnknownDirection(token.to_string()))
}

/// Parse every token, stopping at the first bad one.
pub fn parse_script<I, S>(tokens: I) -> Result<Vec<ScriptStep>, ScriptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter(|t| !t.as_ref().trim().is_empty())
        .map(|t| parse_token(t.as_ref().trim()))
        .collect()
}

/// Play `steps` starting at `now_ms`, returning the clock afterwards.
///
/// Waits are split into `tick_ms` frames; the last frame lands exactly on
/// the end of the wait.
pub fn play<S: PieceSource>(
    state: &mut GameState<S>,
    steps: &[ScriptStep],
    mut now_ms: u64,
    tick_ms: u32,
) -> u64 {
    let frame = u64::from(tick_ms.max(1));
    for step in steps {
        match *step {
            ScriptStep::Command(command) => {
                state.apply(command, now_ms);
            }
            ScriptStep::Wait(ms) => {
                let end = now_ms.saturating_add(ms);
                while now_ms < end {
                    now_ms = (now_ms + frame).min(end);
                    state.tick(now_ms);
                }
            }
        }
    }
    now_ms
}
