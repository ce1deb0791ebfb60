//! Scoring module - line clear points, drop points, levels and gravity speed
//!
//! Rules:
//! - Line clears score from a fixed table with no level multiplier.
//! - Hard drops score two points per cell fallen; soft drop steps score one.
//! - Level is derived from cumulative lines, starting at 1.
//! - Gravity speeds up 60ms per level from 800ms, floored at 100ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL,
    LINE_SCORES, LINE_SCORE_FALLBACK,
};

/// Points for clearing `lines` rows with one lock
pub fn line_clear_score(lines: u32) -> u32 {
    match LINE_SCORES.get(lines as usize) {
        Some(&points) => points,
        None => lines.saturating_mul(LINE_SCORE_FALLBACK),
    }
}

/// Points for a hard drop of `distance` cells
pub fn hard_drop_score(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Level reached after `lines` cumulative cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
