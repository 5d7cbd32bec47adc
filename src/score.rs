//! Scoring tiers and per-player score tracking

/// Points for clearing `lines` rows in a single placement.
///
/// Anything past three rows is capped at the four-row value.
pub fn points_for_lines(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1 => 1,
        2 => 3,
        3 => 6,
        _ => 12,
    }
}

/// Rows of the opponent's field to invert after clearing `lines` rows
pub fn penalty_rows_for(lines: usize) -> usize {
    match lines {
        0..=2 => 0,
        3 => 3,
        _ => 4,
    }
}

/// Running score of one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces placed
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed placement, returns the points it earned
    pub fn add_placement(&mut self, lines: usize) -> u32 {
        let points = points_for_lines(lines);
        self.points += points;
        self.lines += lines as u32;
        self.pieces += 1;
        points
    }

    /// Label shown for a clear of `lines` rows
    pub fn clear_name(lines: usize) -> Option<&'static str> {
        match lines {
            0 => None,
            1 => Some("Single"),
            2 => Some("Double"),
            3 => Some("Triple"),
            _ => Some("Tetris"),
        }
    }
}
