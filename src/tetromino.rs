//! Tetromino catalog
//!
//! The seven piece kinds of the pool, each with its canonical template.
//! Templates are stored flush against the bottom-left corner of their box,
//! which is the normal form every rotated shape is adjusted back into.

use ratatui::style::Color;

/// Number of distinct piece kinds in a pool
pub const KIND_COUNT: usize = 7;

/// The 7 tetromino types, in pool order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    T,
    I,
    J,
    L,
    O,
    S,
    Z,
}

impl TetrominoType {
    /// Get all tetromino types in pool order
    pub fn all() -> [TetrominoType; KIND_COUNT] {
        [
            TetrominoType::T,
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::Z,
        ]
    }

    /// Occupant code written into the field for this kind (1..=7)
    pub fn value(&self) -> u8 {
        match self {
            TetrominoType::T => 1,
            TetrominoType::I => 2,
            TetrominoType::J => 3,
            TetrominoType::L => 4,
            TetrominoType::O => 5,
            TetrominoType::S => 6,
            TetrominoType::Z => 7,
        }
    }

    /// Side length of the square occupancy matrix
    pub fn shape_len(&self) -> usize {
        match self {
            TetrominoType::I => 4,
            TetrominoType::O => 2,
            _ => 3,
        }
    }

    /// Number of distinct rotational states
    pub fn rotation_count(&self) -> usize {
        match self {
            TetrominoType::T | TetrominoType::J | TetrominoType::L => 4,
            TetrominoType::I | TetrominoType::S | TetrominoType::Z => 2,
            TetrominoType::O => 1,
        }
    }

    /// Canonical template, row-major, `shape_len * shape_len` entries
    pub fn template(&self) -> &'static [u8] {
        match self {
            TetrominoType::T => &[
                0, 0, 0, //
                0, 1, 0, //
                1, 1, 1,
            ],
            TetrominoType::I => &[
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                1, 1, 1, 1,
            ],
            TetrominoType::J => &[
                0, 0, 0, //
                1, 0, 0, //
                1, 1, 1,
            ],
            TetrominoType::L => &[
                0, 0, 0, //
                0, 0, 1, //
                1, 1, 1,
            ],
            TetrominoType::O => &[
                1, 1, //
                1, 1,
            ],
            TetrominoType::S => &[
                0, 0, 0, //
                0, 1, 1, //
                1, 1, 0,
            ],
            TetrominoType::Z => &[
                0, 0, 0, //
                1, 1, 0, //
                0, 1, 1,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::T => "T",
            TetrominoType::I => "I",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
            TetrominoType::O => "O",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
        }
    }

    /// Look up a kind by its occupant code
    pub fn from_value(value: u8) -> Option<TetrominoType> {
        Self::all().into_iter().find(|kind| kind.value() == value)
    }

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::T => Color::Magenta,
            TetrominoType::I => Color::Cyan,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 143, 0), // Orange
            TetrominoType::O => Color::Yellow,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
        }
    }
}
