//! Applied half-moves and the errors that can stop one from being applied.
//!
//! A [`Move`] is only ever constructed by the controller after the model
//! accepted an input, so holding one means the half-move is part of the
//! session history.

use super::notifier::ViewError;
use super::{GameStatus, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One validated and applied half-move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    mover: Side,
    description: String,
    sequence_number: usize,
}

impl Move {
    /// Creates a new move record.
    #[instrument(skip(description))]
    pub(crate) fn new(mover: Side, description: String, sequence_number: usize) -> Self {
        Self {
            mover,
            description,
            sequence_number,
        }
    }

    /// Side that made this half-move.
    pub fn mover(&self) -> Side {
        self.mover
    }

    /// Model-produced summary, e.g. `Nf3` or `resigns`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Zero-based position of this half-move in the session history.
    pub fn sequence_number(&self) -> usize {
        self.sequence_number
    }

    /// Full-move number as printed in game records (1-based).
    pub fn full_move_number(&self) -> usize {
        self.sequence_number / 2 + 1
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}: {}", self.sequence_number, self.mover, self.description)
    }
}

/// Error returned by [`GameController::apply_move`](crate::GameController::apply_move).
///
/// Every variant except `NotificationFailed` guarantees that the session was
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The model rejected the input.
    #[display("Illegal move '{}': {}", input, reason)]
    Illegal {
        /// Input as received from the player.
        input: String,
        /// Model's explanation.
        reason: String,
    },

    /// The game has already reached a terminal status.
    #[display("Game is already over ({})", _0)]
    GameOver(GameStatus),

    /// Another `apply_move` (or restart) is still running.
    #[display("Controller is busy applying another move")]
    Busy,

    /// The move stands but at least one view failed to update.
    #[display("{} view(s) failed to update", failures.len())]
    NotificationFailed {
        /// The committed move, if the failure followed a move.
        applied: Option<Move>,
        /// One entry per failed view callback.
        failures: Vec<ViewError>,
    },
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Returns the move that was committed despite this error, if any.
    pub fn committed_move(&self) -> Option<&Move> {
        match self {
            MoveError::NotificationFailed { applied, .. } => applied.as_ref(),
            _ => None,
        }
    }
}
