//! Square occupancy matrix with in-place rotation
//!
//! A shape owns a `side x side` row-major buffer of occupant codes
//! (0 = empty, anything else = solid). Rotation peels the matrix ring by
//! ring and never allocates. After rotating, [`Shape::adjust`] pushes the
//! solid cells back against the bottom-left corner of the box.

/// Square occupancy matrix of a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    side: usize,
    cells: Vec<u8>,
}

impl Shape {
    /// Build a shape from a 0/1 template, writing `value` into solid cells
    pub fn from_template(template: &[u8], side: usize, value: u8) -> Self {
        debug_assert_eq!(template.len(), side * side);
        let cells = template
            .iter()
            .map(|&cell| if cell != 0 { value } else { 0 })
            .collect();
        Self { side, cells }
    }

    /// Side length of the matrix
    pub fn side(&self) -> usize {
        self.side
    }

    /// Occupant code at (row, col), None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.side || col >= self.side {
            return None;
        }
        Some(self.cells[row * self.side + col])
    }

    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|cell| cell != 0)
    }

    /// Iterate over the rows of the matrix, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.side)
    }

    /// Positions `(row, col)` of every solid cell
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell != 0)
            .map(|(idx, _)| (idx / self.side, idx % self.side))
    }

    /// Rotate 90° clockwise `n` times, then adjust
    pub fn rotate_right(&mut self, n: usize) {
        for _ in 0..n {
            self.rotate_in_place();
        }
        self.adjust();
        debug_assert!(self.is_normalized());
    }

    /// One exact 90° clockwise rotation, without adjustment.
    ///
    /// Each concentric ring is shifted one step clockwise `side - 1` times.
    pub fn rotate_in_place(&mut self) {
        let n = self.side;
        for top in 0..(n + 1) / 2 {
            let bottom = n - 1 - top;
            if bottom <= top {
                // center cell of an odd-sized matrix
                continue;
            }
            for _ in 0..(bottom - top) {
                self.shift_ring(top, bottom);
            }
        }
    }

    /// Shift the ring bounded by `top..=bottom` one position clockwise
    fn shift_ring(&mut self, top: usize, bottom: usize) {
        let n = self.side;
        let temp = self.cells[top * n + top];

        // left column moves up
        for i in top..bottom {
            self.cells[i * n + top] = self.cells[(i + 1) * n + top];
        }
        // bottom row moves left
        for j in top..bottom {
            self.cells[bottom * n + j] = self.cells[bottom * n + j + 1];
        }
        // right column moves down
        for i in (top + 1..=bottom).rev() {
            self.cells[i * n + bottom] = self.cells[(i - 1) * n + bottom];
        }
        // top row moves right
        for j in (top + 2..=bottom).rev() {
            self.cells[top * n + j] = self.cells[top * n + j - 1];
        }
        self.cells[top * n + top + 1] = temp;
    }

    /// Push the solid cells flush against the left column and bottom row
    pub fn adjust(&mut self) {
        for _ in 0..self.side {
            if self.column_is_empty(0) {
                self.shift_left();
            }
        }
        for _ in 0..self.side {
            if self.row_is_empty(self.side - 1) {
                self.shift_down();
            }
        }
    }

    fn column_is_empty(&self, col: usize) -> bool {
        (0..self.side).all(|row| self.cells[row * self.side + col] == 0)
    }

    fn row_is_empty(&self, row: usize) -> bool {
        self.cells[row * self.side..(row + 1) * self.side]
            .iter()
            .all(|&cell| cell == 0)
    }

    /// Move every column one step left, emptying the rightmost column
    fn shift_left(&mut self) {
        for row in self.cells.chunks_mut(self.side) {
            row.rotate_left(1);
            if let Some(last) = row.last_mut() {
                *last = 0;
            }
        }
    }

    /// Move every row one step down, emptying the top row
    fn shift_down(&mut self) {
        let side = self.side;
        self.cells.copy_within(0..side * (side - 1), side);
        self.cells[..side].fill(0);
    }

    /// Columns spanned by the shape: rightmost solid column + 1
    pub fn width(&self) -> usize {
        (0..self.side)
            .rev()
            .find(|&col| !self.column_is_empty(col))
            .map_or(0, |col| col + 1)
    }

    /// Lowest solid row in `col`, None if the column has no solid cell
    pub fn last_solid_row(&self, col: usize) -> Option<usize> {
        (0..self.side).rev().find(|&row| self.is_solid(row, col))
    }

    /// True when the shape touches both the left column and the bottom row
    pub fn is_normalized(&self) -> bool {
        !self.column_is_empty(0) && !self.row_is_empty(self.side - 1)
    }
}
