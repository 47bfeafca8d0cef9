//! The two sides of a chess game.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A side (colour) in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// White (moves first).
    #[default]
    White,
    /// Black (moves second).
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Side expected to make the half-move with the given sequence number.
    pub fn for_sequence_number(sequence_number: usize) -> Self {
        if sequence_number % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}
