//! Scoring module - classic line-clear scoring and level cadence
//!
//! Line clears pay `LINE_SCORES[n] * level` with levels starting at 1.
//! Gravity is measured in frames at 60 FPS and converted to whole milliseconds.

use crate::types::{
    BASE_FRAMES_PER_DROP, FRAMES_PER_LEVEL_STEP, FRAMES_PER_SECOND, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES,
};

/// Most rows a single piece can complete
pub const MAX_LINES_PER_LOCK: usize = LINE_SCORES.len() - 1;

/// Calculate line clear score
/// lines: number of lines cleared, clamped to 0-4
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(MAX_LINES_PER_LOCK)].saturating_mul(level)
}

/// Points for a hard drop of `rows` rows
pub fn calculate_hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Frames between automatic drops at a level (never below 1)
pub fn frames_per_drop(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FRAMES_PER_LEVEL_STEP);
    BASE_FRAMES_PER_DROP.saturating_sub(reduction).max(1)
}

/// Get drop interval for a level (in milliseconds, rounded down)
pub fn drop_interval_ms(level: u32) -> u32 {
    frames_per_drop(level) * 1000 / FRAMES_PER_SECOND
}
