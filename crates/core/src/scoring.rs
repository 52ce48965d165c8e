//! Scoring module - line-clear points and level progression
//!
//! - Each cleared line is worth `points_per_line * level`.
//! - Level `n` ends once the score reaches `n * level_threshold`; the level rises by at
//!   most one per clearing pass, no matter how far past the threshold the score lands.

use crate::types::Rules;

/// Result of scoring one clearing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points earned by this pass
    pub points: u32,
    /// Score after the pass
    pub score: u32,
    /// Level after the pass
    pub level: u32,
    pub leveled_up: bool,
}

/// Calculate line clear points
/// lines: number of lines cleared in one pass
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32, rules: &Rules) -> u32 {
    (lines as u32)
        .saturating_mul(rules.points_per_line)
        .saturating_mul(level)
}

/// Check whether `score` has reached the end of `level`
pub fn reaches_next_level(score: u32, level: u32, rules: &Rules) -> bool {
    score >= level.saturating_mul(rules.level_threshold)
}

/// Score a clearing pass of `lines` lines starting from `score`/`level`
pub fn calculate_score(lines: usize, score: u32, level: u32, rules: &Rules) -> ScoreResult {
    let points = calculate_line_score(lines, level, rules);
    let score = score.saturating_add(points);
    let leveled_up = lines > 0 && reaches_next_level(score, level, rules);
    ScoreResult {
        points,
        score,
        level: if leveled_up { level + 1 } else { level },
        leveled_up,
    }
}
