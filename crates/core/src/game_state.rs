//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, piece source,
//! scoring and input repeat. It handles drop cadence, piece movement, rotation,
//! line clears, and the session lifecycle.
//!
//! Every operation that depends on time takes `now_ms` from the caller; the
//! engine never reads a clock, so a replay with the same timestamps and the
//! same piece source is identical.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{try_kicks, Piece};
use crate::repeat::DirectionalRepeat;
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{
    calculate_hard_drop_score, calculate_level, calculate_line_score, drop_interval_ms,
    MAX_LINES_PER_LOCK,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Direction, GameCommand, Lifecycle, LockEvent, PieceKind};

/// Counters reported to observers; nothing in the engine reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct Metrics {
    pub pieces_placed: u32,
    /// Locks that cleared four rows at once
    pub tetris_clears: u32,
    /// Successful translations and rotations
    pub total_moves: u32,
    /// Rows cleared by the most recent lock
    pub last_clear: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformPieces> {
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    /// Set by a hold, cleared by the next lock
    hold_used: bool,
    source: S,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    last_drop_ms: u64,
    repeat: DirectionalRepeat,
    lifecycle: Lifecycle,
    paused_at_ms: Option<u64>,
    /// Latest timestamp seen from the driver
    clock_ms: u64,
    /// Running time accumulated before `running_since_ms`
    play_time_ms: u64,
    running_since_ms: u64,
    metrics: Metrics,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState<UniformPieces> {
    /// Create an idle game drawing uniformly random pieces from `config.seed`
    pub fn new(config: &GameConfig) -> Self {
        Self::with_source(config, UniformPieces::new(config.seed))
    }
}

impl Default for GameState<UniformPieces> {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create an idle game with a custom piece source
    pub fn with_source(config: &GameConfig, source: S) -> Self {
        Self::with_board(config, source, Board::new())
    }

    /// Create an idle game over a pre-filled board
    pub fn with_board(config: &GameConfig, mut source: S, board: Board) -> Self {
        let next = source.next_kind();

        Self {
            board,
            active: None,
            next,
            held: None,
            hold_used: false,
            source,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: drop_interval_ms(1),
            last_drop_ms: 0,
            repeat: DirectionalRepeat::new(
                config.horizontal_repeat_ms,
                config.soft_drop_repeat_ms,
            ),
            lifecycle: Lifecycle::Idle,
            paused_at_ms: None,
            clock_ms: 0,
            play_time_ms: 0,
            running_since_ms: 0,
            metrics: Metrics::default(),
            last_event: None,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    /// Whether a hold would be accepted right now
    pub fn can_hold(&self) -> bool {
        self.is_running() && self.active.is_some() && !self.hold_used
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Milliseconds spent running, excluding pauses
    pub fn play_time_ms(&self) -> u64 {
        match self.lifecycle {
            Lifecycle::Running => self
                .play_time_ms
                .saturating_add(self.clock_ms.saturating_sub(self.running_since_ms)),
            _ => self.play_time_ms,
        }
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.rows();

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_piece().map(|p| p.blocks());
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold();
        out.lifecycle = self.lifecycle;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.metrics = self.metrics;
        out.play_time_ms = self.play_time_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Leave `Idle` and spawn the first piece.
    ///
    /// Returns false if the game was not idle or the first spawn was blocked.
    pub fn start(&mut self, now_ms: u64) -> bool {
        self.observe(now_ms);
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }

        self.lifecycle = Lifecycle::Running;
        self.last_drop_ms = now_ms;
        self.running_since_ms = now_ms;
        info!(level = self.level, "session started");

        self.spawn_next()
    }

    /// Toggle between `Running` and `Paused`.
    ///
    /// Resuming moves the gravity and repeat timestamps forward by the pause
    /// length, so cadence picks up where it stopped.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        self.observe(now_ms);
        match self.lifecycle {
            Lifecycle::Running => {
                self.play_time_ms = self.play_time_ms();
                self.paused_at_ms = Some(now_ms);
                self.lifecycle = Lifecycle::Paused;
                info!("paused");
            }
            Lifecycle::Paused => {
                let paused_at = self.paused_at_ms.take().unwrap_or(now_ms);
                let paused_for = now_ms.saturating_sub(paused_at);
                self.last_drop_ms = self.last_drop_ms.saturating_add(paused_for);
                self.repeat.shift(paused_for);
                self.running_since_ms = now_ms;
                self.lifecycle = Lifecycle::Running;
                info!(paused_for, "resumed");
            }
            Lifecycle::Idle | Lifecycle::GameOver => return false,
        }
        true
    }

    /// Re-initialize the session and start it again.
    ///
    /// Clears the board, score, level, lines, metrics, hold and input state,
    /// and draws a fresh `next`. Accepted in every lifecycle state.
    pub fn reset(&mut self, now_ms: u64) -> bool {
        info!(
            score = self.score,
            lines = self.lines,
            from = self.lifecycle.as_str(),
            "session reset"
        );

        self.board.clear();
        self.active = None;
        self.held = None;
        self.hold_used = false;
        self.next = self.source.next_kind();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = drop_interval_ms(1);
        self.repeat.clear();
        self.paused_at_ms = None;
        self.play_time_ms = 0;
        self.metrics = Metrics::default();
        self.last_event = None;
        self.lifecycle = Lifecycle::Idle;

        self.start(now_ms)
    }

    /// Advance one frame: held-direction repeats, then gravity.
    ///
    /// Returns true if anything was attempted that may have changed state.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.observe(now_ms);
        if !self.is_running() {
            return false;
        }

        let mut changed = false;
        for dir in self.repeat.due(now_ms) {
            if !self.is_running() {
                break;
            }
            self.move_piece(dir);
            changed = true;
        }

        if self.is_running()
            && now_ms.saturating_sub(self.last_drop_ms) >= u64::from(self.drop_interval_ms)
        {
            self.last_drop_ms = now_ms;
            self.translate(0, 1);
            changed = true;
        }

        changed
    }

    /// Apply a command from an input source
    pub fn apply(&mut self, command: GameCommand, now_ms: u64) -> bool {
        self.observe(now_ms);
        match command {
            GameCommand::Press(dir) => self.press(dir, now_ms),
            GameCommand::Release(dir) => self.release(dir),
            GameCommand::Move(dir) => self.move_piece(dir),
            GameCommand::Rotate => self.rotate(),
            GameCommand::RotateCcw => self.rotate_ccw(),
            GameCommand::HardDrop => self.hard_drop().is_some(),
            GameCommand::Hold => self.hold(),
            GameCommand::PauseToggle => self.toggle_pause(now_ms),
            GameCommand::Start => self.start(now_ms),
            GameCommand::Reset => self.reset(now_ms),
        }
    }

    /// A direction key went down: step now (unless throttled) and keep
    /// repeating on tick while held.
    pub fn press(&mut self, dir: Direction, now_ms: u64) -> bool {
        self.observe(now_ms);
        if !self.is_running() {
            return false;
        }
        if self.repeat.press(dir, now_ms) {
            self.move_piece(dir)
        } else {
            false
        }
    }

    /// A direction key came up
    pub fn release(&mut self, dir: Direction) -> bool {
        self.repeat.release(dir)
    }

    /// One unthrottled step in `dir`
    pub fn move_piece(&mut self, dir: Direction) -> bool {
        let (dx, dy) = dir.delta();
        self.translate(dx, dy)
    }

    /// Move the falling piece by (dx, dy).
    ///
    /// A blocked downward move locks the piece.
    pub fn translate(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        if let Some(candidate) = active.shifted(dx, dy).filter(|p| p.is_valid(board)) {
            self.active = Some(candidate);
            self.metrics.total_moves = self.metrics.total_moves.saturating_add(1);
            return true;
        }

        if dy > 0 {
            self.lock();
        }
        false
    }

    /// Rotate to the next rotation state, with wall kicks
    pub fn rotate(&mut self) -> bool {
        self.try_rotate(true)
    }

    /// Rotate to the previous rotation state, with wall kicks
    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = if clockwise {
            active.rotated_cw()
        } else {
            active.rotated_ccw()
        };

        let board = &self.board;
        match try_kicks(rotated, |p| p.is_valid(board)) {
            Some(piece) => {
                self.active = Some(piece);
                self.metrics.total_moves = self.metrics.total_moves.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Drop the falling piece to its landing row and lock it.
    ///
    /// Awards 2 points per row travelled. Returns the rows dropped, or
    /// `None` if there was nothing to drop.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_running() || self.active.is_none() {
            return None;
        }

        let mut rows: u32 = 0;
        while self.translate(0, 1) {
            rows += 1;
        }

        self.score = self.score.saturating_add(calculate_hard_drop_score(rows));
        Some(rows)
    }

    /// Swap the falling piece with the hold slot (once per piece)
    pub fn hold(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        self.hold_used = true;
        match self.held.replace(active.kind) {
            Some(previous) => {
                debug!(
                    held = active.kind.as_str(),
                    released = previous.as_str(),
                    "hold swap"
                );
                self.install(previous)
            }
            None => {
                debug!(held = active.kind.as_str(), "hold");
                self.spawn_next()
            }
        }
    }

    /// Calculate where the falling piece would land
    pub fn ghost_piece(&self) -> Option<Piece> {
        let mut ghost = self.active?;
        while let Some(below) = ghost.shifted(0, 1).filter(|p| p.is_valid(&self.board)) {
            ghost = below;
        }
        Some(ghost)
    }

    /// Lock the falling piece onto the board and handle line clears
    ///
    /// The clear is applied to the board before this returns; scoring uses
    /// the level in effect before the clear.
    pub fn lock(&mut self) -> Option<LockEvent> {
        if !self.is_running() {
            return None;
        }
        let active = self.active.take()?;

        self.board.place(&active.blocks(), active.kind);

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len().min(MAX_LINES_PER_LOCK);

        let score_gained = calculate_line_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(score_gained);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        let new_level = calculate_level(self.lines).max(self.level);
        let level_up = new_level > self.level;
        if level_up {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
            info!(
                level = self.level,
                drop_interval_ms = self.drop_interval_ms,
                "level up"
            );
        }

        self.metrics.pieces_placed = self.metrics.pieces_placed.saturating_add(1);
        self.metrics.last_clear = lines_cleared as u32;
        if lines_cleared == MAX_LINES_PER_LOCK {
            self.metrics.tetris_clears = self.metrics.tetris_clears.saturating_add(1);
        }

        debug!(
            kind = active.kind.as_str(),
            lines = lines_cleared,
            score_gained,
            score = self.score,
            "piece locked"
        );

        self.hold_used = false;
        let spawned = self.spawn_next();

        let event = LockEvent {
            lines_cleared: lines_cleared as u32,
            score_gained,
            level_up,
            game_over: !spawned,
        };
        self.last_event = Some(event);
        Some(event)
    }

    /// Spawn the queued `next` kind and refill the queue
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        if !self.install(kind) {
            return false;
        }
        self.next = self.source.next_kind();
        true
    }

    /// Place a fresh piece of `kind` at the spawn anchor, or end the game
    fn install(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind);
        if !piece.is_valid(&self.board) {
            debug!(kind = kind.as_str(), "spawn blocked");
            self.enter_game_over();
            return false;
        }

        trace!(kind = kind.as_str(), "spawned");
        self.active = Some(piece);
        true
    }

    fn enter_game_over(&mut self) {
        self.play_time_ms = self.play_time_ms();
        self.active = None;
        self.repeat.clear();
        self.lifecycle = Lifecycle::GameOver;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
    }

    fn observe(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::CyclePieces;
    use crate::types::BOARD_HEIGHT;

    fn game_with(kinds: &[PieceKind]) -> GameState<CyclePieces> {
        GameState::with_source(&GameConfig::default(), CyclePieces::new(kinds).unwrap())
    }

    fn started_with(kinds: &[PieceKind]) -> GameState<CyclePieces> {
        let mut state = game_with(kinds);
        assert!(state.start(0));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(&GameConfig::default());

        assert_eq!(state.lifecycle(), Lifecycle::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, 800);
        assert!(state.active.is_none());
        assert!(state.held.is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = game_with(&[PieceKind::T, PieceKind::L]);
        assert_eq!(state.next, PieceKind::T);

        assert!(state.start(0));
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.active, Some(Piece::spawn(PieceKind::T)));
        assert_eq!(state.next, PieceKind::L);

        // Second start is a no-op.
        assert!(!state.start(10));
    }

    #[test]
    fn commands_are_ignored_while_idle() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(!state.translate(1, 0));
        assert!(!state.rotate());
        assert!(!state.hold());
        assert_eq!(state.hard_drop(), None);
        assert!(!state.toggle_pause(0));
        assert!(!state.tick(10_000));
    }

    #[test]
    fn test_try_move() {
        let mut state = started_with(&[PieceKind::T]);
        let initial_x = state.active.unwrap().x;

        assert!(state.translate(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.translate(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);

        // Upward moves are legal while the piece stays inside the columns.
        assert!(state.translate(0, -1));
        assert_eq!(state.metrics.total_moves, 3);
    }

    #[test]
    fn horizontal_move_into_wall_fails_without_change() {
        let mut state = started_with(&[PieceKind::O]);
        let mut moved = 0;
        for _ in 0..10 {
            if state.translate(-1, 0) {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.metrics.pieces_placed, 0);
    }

    #[test]
    fn blocked_downward_move_locks() {
        let mut state = started_with(&[PieceKind::I, PieceKind::O]);
        for _ in 0..(BOARD_HEIGHT - 1) {
            assert!(state.translate(0, 1));
        }
        assert!(!state.translate(0, 1));

        for x in 3..7 {
            assert_eq!(state.board.get(x, 19), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.active.unwrap().kind, PieceKind::O);
        assert_eq!(state.metrics.pieces_placed, 1);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
    }

    #[test]
    fn test_translate_stops_at_coordinate_limits() {
        let mut state = started_with(&[PieceKind::T]);

        assert!(!state.translate(127, 0));
        assert!(!state.translate(-128, 0));
        assert_eq!(state.active.unwrap().x, 3);

        // Cells above the board are open, so the climb ends only at i8::MIN.
        let mut climbed = 0;
        for _ in 0..200 {
            if state.translate(0, -1) {
                climbed += 1;
            }
        }
        assert_eq!(climbed, 128);
        assert_eq!(state.active.unwrap().y, -128);
        assert_eq!(state.lifecycle(), Lifecycle::Running);

        assert!(state.rotate());
        assert!(state.ghost_piece().is_some());
        assert!(state.hard_drop().unwrap() > 128);
        assert_eq!(state.metrics.pieces_placed, 1);
    }

    #[test]
    fn test_try_rotate() {
        let mut state = started_with(&[PieceKind::T]);
        state.translate(0, 3);

        assert!(state.rotate());
        assert_eq!(state.active.unwrap().rotation, 1);
        assert!(state.rotate_ccw());
        assert_eq!(state.active.unwrap().rotation, 0);
        assert!(state.rotate_ccw());
        assert_eq!(state.active.unwrap().rotation, 3);
    }

    #[test]
    fn rotation_uses_first_valid_kick() {
        // Upright T hugging the left wall: the flat state sticks out one column
        // and the (+1, 0) kick is the first that fits.
        let mut state = started_with(&[PieceKind::T]);
        assert!(state.rotate());
        while state.translate(-1, 0) {}
        assert_eq!(state.active.unwrap().x, -1);

        assert!(state.rotate());
        let after = state.active.unwrap();
        assert_eq!(after.rotation, 2);
        assert_eq!((after.x, after.y), (0, 0));
    }

    #[test]
    fn vertical_bar_against_right_wall_cannot_rotate() {
        let mut state = started_with(&[PieceKind::I]);
        assert!(state.rotate());
        while state.translate(1, 0) {}
        let before = state.active.unwrap();
        assert_eq!(before.x, 9);

        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn failed_rotation_leaves_piece_unchanged() {
        // A vertical I in a one-wide well cannot turn horizontal.
        let rows: Vec<&str> = vec!["IIII.IIIII"; 8];
        let board = Board::from_rows(&rows).unwrap();
        let mut state = GameState::with_board(
            &GameConfig::default(),
            CyclePieces::repeat(PieceKind::I),
            board,
        );
        assert!(state.start(0));
        assert!(state.rotate());
        assert!(state.translate(1, 0));
        while state.translate(0, 1) {
            if state.active.unwrap().y >= 14 {
                break;
            }
        }
        let before = state.active.unwrap();
        assert_eq!(before.x, 4);
        assert_eq!(before.y, 14);

        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_hard_drop() {
        let mut state = started_with(&[PieceKind::I, PieceKind::T]);

        assert_eq!(state.hard_drop(), Some(19));
        assert_eq!(state.score, 38);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.metrics.pieces_placed, 1);
    }

    #[test]
    fn test_hold() {
        let mut state = started_with(&[PieceKind::T, PieceKind::S, PieceKind::Z]);
        assert_eq!(state.next, PieceKind::S);

        assert!(state.hold());
        assert_eq!(state.held, Some(PieceKind::T));
        assert_eq!(state.active.unwrap().kind, PieceKind::S);
        assert_eq!(state.next, PieceKind::Z);

        // Second hold before a lock is a no-op.
        let active = state.active;
        assert!(!state.hold());
        assert_eq!(state.held, Some(PieceKind::T));
        assert_eq!(state.active, active);

        // After a lock the swap brings T back without consuming `next`.
        state.hard_drop();
        assert_eq!(state.active.unwrap().kind, PieceKind::Z);
        let next_before = state.next;
        assert!(state.hold());
        assert_eq!(state.active, Some(Piece::spawn(PieceKind::T)));
        assert_eq!(state.held, Some(PieceKind::Z));
        assert_eq!(state.next, next_before);
    }

    #[test]
    fn hold_swap_into_blocked_spawn_ends_game() {
        let mut state = started_with(&[PieceKind::I, PieceKind::O]);
        assert!(state.hold()); // I held, O falling
        state.hard_drop(); // O locks, the next I spawns
        assert_eq!(state.active.unwrap().kind, PieceKind::I);

        assert!(state.translate(0, 5));
        for x in 3..7 {
            state.board.set(x, 0, Some(PieceKind::Z));
        }

        assert!(!state.hold());
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_lock_piece_clears_lines() {
        let board = Board::from_rows(&["IIIIIII..I"]).unwrap();
        let mut state =
            GameState::with_board(&GameConfig::default(), CyclePieces::repeat(PieceKind::O), board);
        assert!(state.start(0));
        assert!(state.translate(4, 0)); // O covers columns 7-8
        state.hard_drop();

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 40 + 2 * 18);
        // The O's top half dropped into the cleared row.
        assert_eq!(state.board.get(7, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(8, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(0, 19), Some(None));
        assert_eq!(state.metrics.last_clear, 1);
    }

    #[test]
    fn test_level_progression() {
        let mut state = started_with(&[PieceKind::I]);
        state.lines = 9;
        state.board = Board::from_rows(&["TTT....TTT"]).unwrap();

        assert_eq!(state.hard_drop(), Some(19));

        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms, 716);
        // The clear is scored at the level it happened on.
        assert_eq!(state.score, 40 + 38);
        assert!(state.take_last_event().unwrap().level_up);
    }

    #[test]
    fn test_game_over_detection() {
        let mut board = Board::new();
        board.set(4, 1, Some(PieceKind::Z));
        let mut state =
            GameState::with_board(&GameConfig::default(), CyclePieces::repeat(PieceKind::O), board);

        assert!(!state.start(0));
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert!(state.active.is_none());
        assert!(!state.translate(1, 0));
        assert!(!state.tick(5_000));
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = started_with(&[PieceKind::T]);
        let y0 = state.active.unwrap().y;

        assert!(!state.tick(799));
        assert_eq!(state.active.unwrap().y, y0);

        assert!(state.tick(800));
        assert_eq!(state.active.unwrap().y, y0 + 1);

        // Cadence restarts from the drop.
        assert!(!state.tick(1_599));
        assert!(state.tick(1_600));
        assert_eq!(state.active.unwrap().y, y0 + 2);
    }

    #[test]
    fn test_pause_stops_game() {
        let mut state = started_with(&[PieceKind::T]);
        assert!(state.toggle_pause(500));
        assert_eq!(state.lifecycle, Lifecycle::Paused);

        assert!(!state.tick(10_000));
        assert!(!state.translate(1, 0));
        assert!(!state.hold());
        assert_eq!(state.active.unwrap().y, 0);

        // Resume after 1000ms of pause: 300ms of cadence remain.
        assert!(state.toggle_pause(1_500));
        assert!(!state.tick(1_799));
        assert!(state.tick(1_800));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn play_time_excludes_pauses() {
        let mut state = started_with(&[PieceKind::T]);
        state.tick(400);
        state.toggle_pause(400);
        state.toggle_pause(2_400);
        state.tick(2_500);
        assert_eq!(state.play_time_ms(), 500);
    }

    #[test]
    fn held_direction_repeats_on_tick() {
        let mut state = started_with(&[PieceKind::O]);
        let x0 = state.active.unwrap().x;

        assert!(state.apply(GameCommand::Press(Direction::Right), 0));
        assert_eq!(state.active.unwrap().x, x0 + 1);

        state.tick(50);
        assert_eq!(state.active.unwrap().x, x0 + 1);
        state.tick(100);
        assert_eq!(state.active.unwrap().x, x0 + 2);

        assert!(state.apply(GameCommand::Release(Direction::Right), 120));
        state.tick(300);
        assert_eq!(state.active.unwrap().x, x0 + 2);
    }

    #[test]
    fn test_apply_action_restart() {
        let mut state = started_with(&[PieceKind::I, PieceKind::T]);
        state.hard_drop();
        state.hold();
        assert!(state.score > 0);

        assert!(state.apply(GameCommand::Reset, 100));
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert!(state.held.is_none());
        assert_eq!(state.metrics, Metrics::default());
        assert!(state.board.is_empty());
    }

    #[test]
    fn ghost_lands_on_floor() {
        let state = started_with(&[PieceKind::T]);
        let ghost = state.ghost_piece().unwrap();
        assert_eq!(ghost.y, 18);
        assert_eq!(ghost.x, state.active.unwrap().x);

        let snap = state.snapshot();
        assert_eq!(snap.ghost, Some(ghost.blocks()));
        assert_eq!(snap.active.unwrap().cells, state.active.unwrap().blocks());
    }
}
