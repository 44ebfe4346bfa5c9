//! Key mapping from terminal events to game commands.

use crate::types::{Direction, GameCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Direction bound to a key, if any.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Direction::Down),
        _ => None,
    }
}

/// Map keyboard input to game commands.
///
/// Movement keys map to a single-shot [`GameCommand::Move`]; the
/// [`InputHandler`](crate::InputHandler) turns them into press/release pairs.
/// Check [`should_quit`] first: Ctrl-C shares its key with hold.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    if let Some(dir) = direction_for(key.code) {
        return Some(GameCommand::Move(dir));
    }

    match key.code {
        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameCommand::Rotate),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(GameCommand::RotateCcw)
        }

        // Actions
        KeyCode::Char(' ') => Some(GameCommand::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameCommand::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::PauseToggle),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
