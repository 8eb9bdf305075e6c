//! Scoring module - score, cleared rows and level
//!
//! Classic per-line bonus: clearing `n` rows at once awards
//! `LINE_POINTS[n - 1] * (level + 1)`. The level itself is advanced by the
//! session's gravity tick, never by a clear.

use crate::types::{LINE_POINTS, ROWS_PER_LEVEL};

/// Calculate line clear score
/// rows: number of rows cleared at once (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows > LINE_POINTS.len() {
        return 0;
    }
    LINE_POINTS[rows - 1].saturating_mul(level.saturating_add(1))
}

/// Progress tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Progress {
    score: u32,
    rows: u32,
    level: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Cumulative cleared rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Record one sweep. Returns the points awarded (0 when nothing cleared).
    pub fn record_clear(&mut self, rows: usize) -> u32 {
        if rows == 0 {
            return 0;
        }
        let points = calculate_line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.rows = self.rows.saturating_add(rows as u32);
        points
    }

    /// Has the cumulative row count passed the current level's threshold?
    pub fn level_up_due(&self) -> bool {
        self.rows > (self.level + 1) * ROWS_PER_LEVEL
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn with_totals(score: u32, rows: u32, level: u32) -> Self {
        Self { score, rows, level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 2
        assert_eq!(calculate_line_score(2, 2), 300);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_out_of_table_counts() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_record_clear() {
        let mut progress = Progress::new();
        assert_eq!(progress.record_clear(1), 40);
        assert_eq!(progress.record_clear(4), 1200);
        assert_eq!(progress.score(), 1240);
        assert_eq!(progress.rows(), 5);
        assert_eq!(progress.level(), 0);
    }

    #[test]
    fn test_zero_rows_is_noop() {
        let mut progress = Progress::with_totals(500, 7, 1);
        assert_eq!(progress.record_clear(0), 0);
        assert_eq!(progress, Progress::with_totals(500, 7, 1));
    }

    #[test]
    fn test_level_scales_points() {
        let mut progress = Progress::with_totals(0, 25, 2);
        assert_eq!(progress.record_clear(2), 300);
    }

    #[test]
    fn test_level_up_threshold_is_strict() {
        assert!(!Progress::with_totals(0, 10, 0).level_up_due());
        assert!(Progress::with_totals(0, 11, 0).level_up_due());
        assert!(!Progress::with_totals(0, 20, 1).level_up_due());
        assert!(Progress::with_totals(0, 21, 1).level_up_due());
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::with_totals(900, 14, 1);
        progress.reset();
        assert_eq!(progress, Progress::new());
    }
}
