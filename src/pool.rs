//! The finite piece pool shared by everyone in a session
//!
//! Unlike a bag randomizer the pool never refills: every kind starts with
//! a fixed quantity and each placement takes one away for good.

use crate::piece::Piece;
use crate::tetromino::{KIND_COUNT, TetrominoType};
use rand::Rng;

/// Default quantity of each kind for a single player game
pub const DEFAULT_BASE_QUANTITY: u32 = 20;

/// All seven pieces with their remaining quantities, in catalog order
#[derive(Debug, Clone)]
pub struct PiecePool {
    pieces: Vec<Piece>,
}

impl Default for PiecePool {
    fn default() -> Self {
        Self::new(false, DEFAULT_BASE_QUANTITY)
    }
}

impl PiecePool {
    /// Create a pool, doubling `base_quantity` when two players share it
    pub fn new(multiplayer: bool, base_quantity: u32) -> Self {
        let quantity = if multiplayer {
            base_quantity.saturating_mul(2)
        } else {
            base_quantity
        };
        let pieces = TetrominoType::all()
            .into_iter()
            .map(|kind| Piece::new(kind, quantity))
            .collect();
        Self { pieces }
    }

    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// True while at least one piece has a positive quantity
    pub fn pieces_available(&self) -> bool {
        self.pieces.iter().any(Piece::is_available)
    }

    /// Pieces left across all kinds
    pub fn remaining(&self) -> u32 {
        self.pieces.iter().map(|p| p.quantity).sum()
    }

    /// Index of the first available piece
    pub fn first_available(&self) -> Option<usize> {
        self.pieces.iter().position(Piece::is_available)
    }

    /// Next available index after `from`, wrapping around
    pub fn next_available(&self, from: usize) -> Option<usize> {
        (1..=KIND_COUNT)
            .map(|step| (from + step) % KIND_COUNT)
            .find(|&idx| self.pieces[idx].is_available())
    }

    /// Previous available index before `from`, wrapping around
    pub fn previous_available(&self, from: usize) -> Option<usize> {
        (1..=KIND_COUNT)
            .map(|step| (from + KIND_COUNT - step % KIND_COUNT) % KIND_COUNT)
            .find(|&idx| self.pieces[idx].is_available())
    }

    /// Uniform choice among the available pieces
    pub fn random_available<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let available: Vec<usize> = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_available())
            .map(|(idx, _)| idx)
            .collect();
        if available.is_empty() {
            return None;
        }
        Some(available[rng.gen_range(0..available.len())])
    }
}
