//! Dropping pieces into the field
//!
//! A piece falls as a rigid body. For every column the shape spans, only
//! its lowest solid cell is tested against the field; the first candidate
//! row where any of those cells hits a block stops the fall, and the piece
//! rests one row above it. A column with no solid cell never collides.

use crate::board::{Board, PREVIEW_CODE};
use crate::piece::Piece;
use crate::score::points_for_lines;
use crate::shape::Shape;
use tracing::debug;

/// Where a piece came to rest and what it cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    /// Field row of the shape box's top edge
    pub row: usize,
    /// Field column of the shape box's left edge, after clamping
    pub column: usize,
    pub lines_cleared: usize,
    pub points: u32,
}

/// Result of committing a piece to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(Landing),
    /// The hidden margin is no longer empty; the field keeps the losing state
    Lost(Landing),
}

impl Placement {
    pub fn landing(&self) -> &Landing {
        match self {
            Placement::Placed(landing) | Placement::Lost(landing) => landing,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Placement::Lost(_))
    }
}

/// A hypothetical placement evaluated on a scratch copy of the field
#[derive(Debug, Clone)]
pub struct Preview {
    /// Scratch field with the piece drawn in [`PREVIEW_CODE`]
    pub board: Board,
    pub placement: Placement,
}

/// Leftmost column that keeps a shape of `width` inside the field
pub fn clamp_column(cols: usize, width: usize, column: usize) -> usize {
    column.min(cols.saturating_sub(width))
}

/// Drop `piece` with `rotation` clockwise turns at `column` and commit it.
///
/// The shape is reset before rotating, so the caller's rotation history
/// does not matter. On return the quantity has been decremented and the
/// shape is canonical again.
pub fn insert(board: &mut Board, piece: &mut Piece, column: usize, rotation: usize) -> Placement {
    piece.reset_shape();
    piece.rotate_right(rotation);

    let side = piece.shape_len();
    let column = clamp_column(board.cols(), piece.width(), column);
    let row = resting_row(board, piece.shape(), column);
    write_shape(board, piece.shape(), piece.value, row, column);

    piece.quantity = piece.quantity.saturating_sub(1);
    piece.reset_shape();

    let lines_cleared = board.clear_lines(row, side);
    let landing = Landing {
        row,
        column,
        lines_cleared,
        points: points_for_lines(lines_cleared),
    };

    debug!(
        piece = piece.kind.name(),
        rotation,
        row,
        column,
        lines_cleared,
        "piece placed"
    );

    if board.is_topped_out() {
        Placement::Lost(landing)
    } else {
        Placement::Placed(landing)
    }
}

/// Evaluate a placement without touching the real field or piece
pub fn preview(board: &Board, piece: &Piece, column: usize, rotation: usize) -> Preview {
    let mut scratch = board.clone();
    let mut ghost = piece.clone().with_value(PREVIEW_CODE);
    let placement = insert(&mut scratch, &mut ghost, column, rotation);
    Preview {
        board: scratch,
        placement,
    }
}

/// Row of the shape box's top edge once the piece stops falling
fn resting_row(board: &Board, shape: &Shape, column: usize) -> usize {
    let side = shape.side();
    let footprint: Vec<Option<usize>> = (0..shape.width())
        .map(|col| shape.last_solid_row(col))
        .collect();

    let mut collision_row = board.rows() - 1;
    'scan: for bottom in side..board.rows() {
        for (offset, last_solid) in footprint.iter().enumerate() {
            let Some(last_solid) = *last_solid else {
                continue;
            };
            let field_row = bottom - (side - 1 - last_solid);
            if board.is_occupied(field_row, column + offset) {
                collision_row = bottom - 1;
                break 'scan;
            }
        }
    }

    (collision_row + 1).saturating_sub(side)
}

/// Copy every solid cell of `shape` into the field
fn write_shape(board: &mut Board, shape: &Shape, value: u8, row: usize, column: usize) {
    for (r, c) in shape.solid_cells() {
        let written = board.set(row + r, column + c, value);
        debug_assert!(written, "shape cell outside the field");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FIELD_COLS, FIELD_ROWS, PENALTY_CODE};
    use crate::tetromino::TetrominoType;
    use proptest::prelude::*;

    fn fill_row_except(board: &mut Board, row: usize, skip: &[usize]) {
        for col in 0..board.cols() {
            if !skip.contains(&col) {
                board.set(row, col, PENALTY_CODE);
            }
        }
    }

    #[test]
    fn test_square_lands_on_floor() {
        let mut board = Board::new();
        let mut piece = Piece::new(TetrominoType::O, 20);

        let placement = insert(&mut board, &mut piece, 0, 0);
        assert_eq!(
            placement,
            Placement::Placed(Landing {
                row: 17,
                column: 0,
                lines_cleared: 0,
                points: 0,
            })
        );
        for (row, col) in [(17, 0), (17, 1), (18, 0), (18, 1)] {
            assert_eq!(board.get(row, col), Some(5));
        }
        assert_eq!(piece.quantity, 19);
    }

    #[test]
    fn test_vertical_line_completes_bottom_row() {
        let mut board = Board::new();
        fill_row_except(&mut board, 18, &[9]);
        board.set(17, 0, 3);
        let mut piece = Piece::new(TetrominoType::I, 1);

        let placement = insert(&mut board, &mut piece, 9, 1);
        let landing = placement.landing();
        assert!(!placement.is_lost());
        assert_eq!(landing.lines_cleared, 1);
        assert_eq!(landing.points, 1);
        // everything above fell by one row
        assert_eq!(board.get(18, 0), Some(3));
        for row in 16..19 {
            assert_eq!(board.get(row, 9), Some(2));
        }
        assert!(board.is_empty_row(0));
        assert!(!board.is_occupied(15, 9));
    }

    #[test]
    fn test_column_is_clamped() {
        let mut board = Board::new();
        let mut piece = Piece::new(TetrominoType::I, 1);
        let placement = insert(&mut board, &mut piece, 8, 0);
        assert_eq!(placement.landing().column, FIELD_COLS - 4);
        assert!(!board.is_row_full(18));
        assert_eq!(board.get(18, 9), Some(2));
    }

    #[test]
    fn test_rests_on_obstacle() {
        let mut board = Board::new();
        board.set(18, 1, 4);
        let mut piece = Piece::new(TetrominoType::T, 1);

        let placement = insert(&mut board, &mut piece, 0, 0);
        assert_eq!(placement.landing().row, 15);
        assert_eq!(board.get(16, 1), Some(1));
        for col in 0..3 {
            assert_eq!(board.get(17, col), Some(1));
        }
        assert!(!board.is_occupied(18, 0));
    }

    #[test]
    fn test_stem_drops_into_slot() {
        let mut board = Board::new();
        fill_row_except(&mut board, 18, &[1]);
        let mut piece = Piece::new(TetrominoType::T, 1);

        // upside-down T: its stem reaches one row lower than its arms
        let placement = insert(&mut board, &mut piece, 0, 2);
        assert_eq!(placement.landing().lines_cleared, 1);
        // the arms fell into the cleared row
        for col in 0..3 {
            assert_eq!(board.get(18, col), Some(1));
        }
        assert!(board.is_empty_row(17));
    }

    #[test]
    fn test_rotation_history_is_ignored() {
        let mut a = Board::new();
        let mut b = Board::new();
        let mut fresh = Piece::new(TetrominoType::L, 2);
        let mut twisted = Piece::new(TetrominoType::L, 2);
        twisted.rotate_right(3);

        insert(&mut a, &mut fresh, 4, 1);
        insert(&mut b, &mut twisted, 4, 1);
        assert_eq!(a, b);
        assert_eq!(twisted.shape(), twisted.base_shape());
    }

    #[test]
    fn test_loss_keeps_board_state() {
        let mut board = Board::new();
        for row in 4..FIELD_ROWS {
            board.set(row, 0, 6);
        }
        let mut piece = Piece::new(TetrominoType::I, 3);

        let placement = insert(&mut board, &mut piece, 0, 1);
        assert!(placement.is_lost());
        assert_eq!(placement.landing().row, 0);
        assert_eq!(board.get(3, 0), Some(2));
        assert!(board.is_topped_out());
        assert_eq!(piece.quantity, 2);
    }

    #[test]
    fn test_preview_leaves_originals_untouched() {
        let mut board = Board::new();
        fill_row_except(&mut board, 18, &[0, 1, 2, 3]);
        let mut piece = Piece::new(TetrominoType::I, 5);
        piece.rotate_right(1);
        let board_before = board.clone();
        let shape_before = piece.shape().clone();

        let preview = preview(&board, &piece, 0, 0);
        assert_eq!(preview.placement.landing().lines_cleared, 1);
        assert!(preview.board.is_empty());
        assert_eq!(board, board_before);
        assert_eq!(piece.shape(), &shape_before);
        assert_eq!(piece.quantity, 5);
    }

    #[test]
    fn test_preview_marks_cells() {
        let board = Board::new();
        let piece = Piece::new(TetrominoType::O, 1);
        let preview = preview(&board, &piece, 3, 0);
        assert_eq!(preview.board.get(18, 3), Some(PREVIEW_CODE));
        assert_eq!(preview.board.get(17, 4), Some(PREVIEW_CODE));
    }

    #[test]
    fn test_clamp_column() {
        assert_eq!(clamp_column(10, 3, 0), 0);
        assert_eq!(clamp_column(10, 3, 7), 7);
        assert_eq!(clamp_column(10, 3, 8), 7);
        assert_eq!(clamp_column(10, 1, 40), 9);
    }

    proptest! {
        #[test]
        fn placements_stay_inside_field(
            moves in proptest::collection::vec((0usize..7, 0usize..14, 0usize..4), 1..60)
        ) {
            let mut board = Board::new();
            for (kind_idx, column, rotation) in moves {
                let kind = TetrominoType::all()[kind_idx];
                let mut piece = Piece::new(kind, 1);

                let mut rotated = piece.clone();
                rotated.rotate_right(rotation);
                let width = rotated.width();

                let placement = insert(&mut board, &mut piece, column, rotation);
                let landing = placement.landing();
                prop_assert!(landing.column + width <= board.cols());
                prop_assert!(landing.row + piece.shape_len() <= board.rows());
                prop_assert_eq!(landing.points, points_for_lines(landing.lines_cleared));
                if placement.is_lost() {
                    break;
                }
            }
        }
    }
}
