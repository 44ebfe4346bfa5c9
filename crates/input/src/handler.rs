//! Held-key tracking for terminal environments.
//!
//! The engine throttles repeats itself; this handler only reports when a
//! movement key goes down and comes up. Terminals that never emit key release
//! events get a synthesized release once a key has been silent for a timeout.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::{direction_for, handle_key_event};
use crate::types::{Direction, GameCommand};

// Terminal key auto-repeat refreshes a held key well inside this window; a
// single tap goes quiet and is released.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKey {
    held: bool,
    last_seen_ms: u64,
}

/// Tracks which movement keys are down.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: [HeldKey; 3],
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            keys: [HeldKey::default(); 3],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.keys[dir.index()].held
    }

    /// Translate a key press (or terminal auto-repeat) into a command.
    ///
    /// A movement key yields `Press` when it goes down and nothing while it
    /// stays down. Other keys map straight through.
    pub fn handle_key_press(&mut self, code: KeyCode, now_ms: u64) -> Option<GameCommand> {
        let Some(dir) = direction_for(code) else {
            return handle_key_event(code.into());
        };

        let key = &mut self.keys[dir.index()];
        key.last_seen_ms = now_ms;
        if key.held {
            return None;
        }
        key.held = true;

        // Left and right share an axis; the engine drops the other one too.
        match dir {
            Direction::Left => self.keys[Direction::Right.index()].held = false,
            Direction::Right => self.keys[Direction::Left.index()].held = false,
            Direction::Down => {}
        }

        Some(GameCommand::Press(dir))
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameCommand> {
        let dir = direction_for(code)?;
        let key = &mut self.keys[dir.index()];
        if !key.held {
            return None;
        }
        key.held = false;
        Some(GameCommand::Release(dir))
    }

    /// Release keys that have been silent longer than the timeout.
    pub fn update(&mut self, now_ms: u64) -> ArrayVec<GameCommand, 3> {
        let mut commands = ArrayVec::new();
        let timeout = u64::from(self.key_release_timeout_ms);

        for dir in Direction::ALL {
            let key = &mut self.keys[dir.index()];
            if key.held && now_ms.saturating_sub(key.last_seen_ms) > timeout {
                key.held = false;
                commands.push(GameCommand::Release(dir));
            }
        }

        commands
    }

    pub fn reset(&mut self) {
        self.keys = [HeldKey::default(); 3];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
