//! Held-direction repeat throttling.
//!
//! Each direction remembers whether it is held and when it last applied a
//! step. A held direction may step again once its interval has elapsed.
//! Left and right share one axis: pressing one releases the other.

use arrayvec::ArrayVec;

use crate::types::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RepeatTimer {
    held: bool,
    last_applied_ms: Option<u64>,
}

/// Per-direction repeat state for left, right and soft drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionalRepeat {
    timers: [RepeatTimer; 3],
    horizontal_interval_ms: u32,
    soft_drop_interval_ms: u32,
}

impl DirectionalRepeat {
    pub fn new(horizontal_interval_ms: u32, soft_drop_interval_ms: u32) -> Self {
        Self {
            timers: [RepeatTimer::default(); 3],
            horizontal_interval_ms,
            soft_drop_interval_ms,
        }
    }

    /// Minimum spacing between two steps in `dir`
    pub fn interval_ms(&self, dir: Direction) -> u32 {
        match dir {
            Direction::Left | Direction::Right => self.horizontal_interval_ms,
            Direction::Down => self.soft_drop_interval_ms,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.timers[dir.index()].held
    }

    /// Mark `dir` held.
    ///
    /// Returns true when a step should be applied now. A press of an
    /// already-held direction never steps; a fresh press steps unless the
    /// direction stepped less than one interval ago.
    pub fn press(&mut self, dir: Direction, now_ms: u64) -> bool {
        if self.is_held(dir) {
            return false;
        }

        match dir {
            Direction::Left => self.release(Direction::Right),
            Direction::Right => self.release(Direction::Left),
            Direction::Down => false,
        };

        self.timers[dir.index()].held = true;
        if self.ready(dir, now_ms) {
            self.timers[dir.index()].last_applied_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    /// Clear the held flag. Returns whether `dir` was held.
    pub fn release(&mut self, dir: Direction) -> bool {
        std::mem::replace(&mut self.timers[dir.index()].held, false)
    }

    /// Held directions whose interval has elapsed at `now_ms`.
    ///
    /// Each returned direction is recorded as applied at `now_ms`.
    pub fn due(&mut self, now_ms: u64) -> ArrayVec<Direction, 3> {
        let mut out = ArrayVec::new();
        for dir in Direction::ALL {
            if self.is_held(dir) && self.ready(dir, now_ms) {
                self.timers[dir.index()].last_applied_ms = Some(now_ms);
                out.push(dir);
            }
        }
        out
    }

    /// Move every recorded timestamp forward (used when resuming from pause).
    pub fn shift(&mut self, delta_ms: u64) {
        for timer in &mut self.timers {
            if let Some(last) = timer.last_applied_ms.as_mut() {
                *last = last.saturating_add(delta_ms);
            }
        }
    }

    /// Forget all held keys and timestamps
    pub fn clear(&mut self) {
        self.timers = [RepeatTimer::default(); 3];
    }

    fn ready(&self, dir: Direction, now_ms: u64) -> bool {
        match self.timers[dir.index()].last_applied_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(self.interval_ms(dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_steps_immediately_then_waits_for_interval() {
        let mut repeat = DirectionalRepeat::new(100, 50);

        assert!(repeat.press(Direction::Left, 1_000));
        assert!(repeat.due(1_099).is_empty());
        assert_eq!(repeat.due(1_100).as_slice(), &[Direction::Left]);
        assert!(repeat.due(1_150).is_empty());
        assert_eq!(repeat.due(1_200).as_slice(), &[Direction::Left]);
    }

    #[test]
    fn directions_keep_independent_timestamps() {
        let mut repeat = DirectionalRepeat::new(100, 50);

        assert!(repeat.press(Direction::Right, 0));
        assert!(repeat.press(Direction::Down, 20));

        assert_eq!(repeat.due(70).as_slice(), &[Direction::Down]);
        assert_eq!(
            repeat.due(120).as_slice(),
            &[Direction::Right, Direction::Down]
        );
    }

    #[test]
    fn repeated_press_while_held_does_not_step() {
        let mut repeat = DirectionalRepeat::new(100, 50);
        assert!(repeat.press(Direction::Down, 0));
        assert!(!repeat.press(Direction::Down, 500));
    }

    #[test]
    fn quick_re_press_is_throttled() {
        let mut repeat = DirectionalRepeat::new(100, 50);
        assert!(repeat.press(Direction::Left, 0));
        assert!(repeat.release(Direction::Left));
        assert!(!repeat.press(Direction::Left, 40));
        // Still held, so it steps once the interval passes.
        assert_eq!(repeat.due(100).as_slice(), &[Direction::Left]);
    }

    #[test]
    fn opposite_horizontal_press_releases_the_other() {
        let mut repeat = DirectionalRepeat::new(100, 50);
        assert!(repeat.press(Direction::Left, 0));
        assert!(repeat.press(Direction::Right, 10));
        assert!(!repeat.is_held(Direction::Left));
        assert!(repeat.is_held(Direction::Right));
    }

    #[test]
    fn release_stops_repeats() {
        let mut repeat = DirectionalRepeat::new(100, 50);
        assert!(repeat.press(Direction::Left, 0));
        assert!(repeat.release(Direction::Left));
        assert!(!repeat.release(Direction::Left));
        assert!(repeat.due(1_000).is_empty());
    }

    #[test]
    fn shift_delays_next_repeat() {
        let mut repeat = DirectionalRepeat::new(100, 50);
        assert!(repeat.press(Direction::Left, 0));
        repeat.shift(500);
        assert!(repeat.due(550).is_empty());
        assert_eq!(repeat.due(600).as_slice(), &[Direction::Left]);
    }
}
