//! Playing field and line clearing
//!
//! Row 0 is the top of the field. The first `HIDDEN_ROWS` rows form a
//! margin above the visible area; anything left in the lowest margin row
//! after a placement means the player has lost.

use tracing::debug;

/// Field dimensions
pub const FIELD_COLS: usize = 10;
pub const VISIBLE_ROWS: usize = 15;
/// Hidden rows above the visible field
pub const HIDDEN_ROWS: usize = 4;
pub const FIELD_ROWS: usize = HIDDEN_ROWS + VISIBLE_ROWS;

/// Occupant codes besides the piece values 1..=7
pub const EMPTY: u8 = 0;
/// Marks cells of a placement preview
pub const PREVIEW_CODE: u8 = 8;
/// Cells produced by row inversion
pub const PENALTY_CODE: u8 = 9;

/// The game field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells, `rows * cols` long
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
    hidden_rows: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty field with the standard dimensions
    pub fn new() -> Self {
        Self::with_size(FIELD_ROWS, FIELD_COLS, HIDDEN_ROWS)
    }

    /// Create an empty field of custom size
    pub fn with_size(rows: usize, cols: usize, hidden_rows: usize) -> Self {
        assert!(hidden_rows >= 1 && hidden_rows < rows && cols > 0);
        Self {
            cells: vec![EMPTY; rows * cols],
            rows,
            cols,
            hidden_rows,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    /// Get the cell at (row, col), None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Set a cell, returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col] = value;
        true
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|cell| cell != EMPTY)
    }

    /// Cells of one row, None if out of bounds
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn is_empty_row(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell == EMPTY))
    }

    /// Check if a line is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell != EMPTY))
    }

    /// Check if the board is completely empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// True when the lowest hidden row holds any block
    pub fn is_topped_out(&self) -> bool {
        !self.is_empty_row(self.hidden_rows - 1)
    }

    /// Remove a row, shifting every row above it down by one
    fn delete_row(&mut self, row: usize) {
        let cols = self.cols;
        self.cells.copy_within(0..row * cols, cols);
        self.cells[..cols].fill(EMPTY);
    }

    /// Clear full rows among `count` rows starting at `from_row`.
    ///
    /// After a removal the same index is checked again, since the row
    /// that fell into it may be full too. Returns the number of rows removed.
    pub fn clear_lines(&mut self, from_row: usize, count: usize) -> usize {
        let mut cleared = 0;
        let mut i = 0;
        while i < count {
            let row = from_row + i;
            if row >= self.rows {
                break;
            }
            if self.is_row_full(row) {
                self.delete_row(row);
                cleared += 1;
            } else {
                i += 1;
            }
        }
        if cleared > 0 {
            debug!(from_row, count, cleared, "rows cleared");
        }
        cleared
    }

    /// Toggle every cell of the bottom `n` rows: blocks vanish, holes fill
    /// with penalty cells
    pub fn invert_rows(&mut self, n: usize) {
        let n = n.min(self.rows);
        let start = (self.rows - n) * self.cols;
        for cell in &mut self.cells[start..] {
            *cell = if *cell != EMPTY { EMPTY } else { PENALTY_CODE };
        }
        debug!(rows = n, "rows inverted");
    }
}
