//! Piece definitions: a catalog kind plus its working shape and quantity

use crate::shape::Shape;
use crate::tetromino::TetrominoType;

/// One entry of the piece pool
#[derive(Debug, Clone)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Occupant code written into the field
    pub value: u8,
    /// Canonical orientation, never mutated
    base_shape: Shape,
    /// Working orientation, always reachable from `base_shape` by rotation
    shape: Shape,
    /// Pieces of this kind left in the pool
    pub quantity: u32,
}

impl Piece {
    /// Create a piece of `kind` in canonical orientation
    pub fn new(kind: TetrominoType, quantity: u32) -> Self {
        let base_shape = Shape::from_template(kind.template(), kind.shape_len(), kind.value());
        Self {
            kind,
            value: kind.value(),
            shape: base_shape.clone(),
            base_shape,
            quantity,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[cfg(test)]
    pub fn base_shape(&self) -> &Shape {
        &self.base_shape
    }

    pub fn shape_len(&self) -> usize {
        self.base_shape.side()
    }

    pub fn rotation_count(&self) -> usize {
        self.kind.rotation_count()
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Rotate the working shape clockwise `n` times, modulo the symmetry count
    pub fn rotate_right(&mut self, n: usize) {
        let n = n % self.rotation_count();
        self.shape.rotate_right(n);
    }

    /// Rotate counter-clockwise `n` times, as clockwise by the complement
    pub fn rotate_left(&mut self, n: usize) {
        let count = self.rotation_count();
        self.rotate_right(count - n % count);
    }

    /// Restore the canonical orientation
    pub fn reset_shape(&mut self) {
        self.shape.clone_from(&self.base_shape);
    }

    /// Columns spanned by the current shape
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    /// Replace the occupant code, used to mark preview placements
    pub(crate) fn with_value(mut self, value: u8) -> Self {
        let recolor = |shape: &Shape| {
            let side = shape.side();
            let template: Vec<u8> = shape.rows().flatten().copied().collect();
            Shape::from_template(&template, side, value)
        };
        self.base_shape = recolor(&self.base_shape);
        self.shape = recolor(&self.shape);
        self.value = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = TetrominoType> {
        (0..TetrominoType::all().len()).prop_map(|i| TetrominoType::all()[i])
    }

    #[test]
    fn test_new_piece_is_canonical() {
        for kind in TetrominoType::all() {
            let piece = Piece::new(kind, 20);
            assert_eq!(piece.shape(), piece.base_shape());
            assert_eq!(piece.quantity, 20);
            assert_eq!(piece.value, kind.value());
        }
    }

    #[test]
    fn test_reset_after_rotation() {
        let mut piece = Piece::new(TetrominoType::L, 1);
        piece.rotate_right(1);
        assert_ne!(piece.shape(), piece.base_shape());
        piece.reset_shape();
        assert_eq!(piece.shape(), piece.base_shape());
    }

    #[test]
    fn test_o_piece_never_changes() {
        let mut piece = Piece::new(TetrominoType::O, 1);
        piece.rotate_right(3);
        piece.rotate_left(1);
        assert_eq!(piece.shape(), piece.base_shape());
    }

    #[test]
    fn test_left_undoes_right() {
        for kind in TetrominoType::all() {
            let mut piece = Piece::new(kind, 1);
            piece.rotate_right(1);
            piece.rotate_left(1);
            assert_eq!(piece.shape(), piece.base_shape(), "{}", kind.name());
        }
    }

    #[test]
    fn test_widths_of_rotated_line() {
        let mut piece = Piece::new(TetrominoType::I, 1);
        assert_eq!(piece.width(), 4);
        piece.rotate_right(1);
        assert_eq!(piece.width(), 1);
        piece.rotate_right(1);
        assert_eq!(piece.width(), 4);
    }

    #[test]
    fn test_with_value_recolors_cells() {
        let piece = Piece::new(TetrominoType::T, 1).with_value(8);
        assert_eq!(piece.value, 8);
        assert!(piece.shape().rows().flatten().all(|&c| c == 0 || c == 8));
    }

    proptest! {
        #[test]
        fn rotation_is_cyclic(kind in kind_strategy(), k in 0usize..8) {
            let mut reference = Piece::new(kind, 1);
            reference.rotate_right(0);

            let mut piece = Piece::new(kind, 1);
            let count = piece.rotation_count();
            piece.rotate_right(k);
            piece.rotate_right(count - k % count);
            prop_assert_eq!(piece.shape(), reference.shape());
        }

        #[test]
        fn rotated_shape_stays_normalized(kind in kind_strategy(), turns in proptest::collection::vec(0usize..4, 1..6)) {
            let mut piece = Piece::new(kind, 1);
            for n in turns {
                piece.rotate_right(n);
                prop_assert!(piece.shape().is_normalized());
                prop_assert_eq!(piece.shape().solid_cells().count(), 4);
            }
        }

        #[test]
        fn width_is_bounded(kind in kind_strategy(), n in 0usize..4) {
            let mut piece = Piece::new(kind, 1);
            piece.rotate_right(n);
            prop_assert!(piece.width() >= 1);
            prop_assert!(piece.width() <= piece.shape_len());
        }
    }
}
