//! The narrow interface the controller consumes from the game model.

use super::{GameStatus, Side};
use derive_more::{Display, Error};
use derive_new::new;

/// Rules engine behind a game session.
///
/// Implementations own the board and decide legality. The controller is the
/// only caller of [`GameModel::apply_move`].
pub trait GameModel {
    /// Validates and applies one half-move.
    ///
    /// A rejected input must leave the model exactly as it was.
    fn apply_move(&mut self, input: &str) -> Result<ModelMoveReport, ModelError>;

    /// Returns the model to the starting position.
    fn reset(&mut self);

    /// Human-readable rendering of the current position.
    fn position_text(&self) -> String {
        String::new()
    }
}

/// What the model reports after accepting a half-move.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ModelMoveReport {
    description: String,
    status: GameStatus,
    next_turn: Side,
}

impl ModelMoveReport {
    /// Summary of the applied move.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Game status after the move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side the model expects to move next.
    pub fn next_turn(&self) -> Side {
        self.next_turn
    }
}

/// Rejection from the model.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ModelError {
    /// The input could not be read as a move at all.
    #[display("cannot read '{}' as a move", input)]
    Unparseable {
        /// Input as received.
        input: String,
    },

    /// The input names a move that is not legal in the current position.
    #[display("{}", reason)]
    Illegal {
        /// Input as received.
        input: String,
        /// Why the move is not allowed.
        reason: String,
    },
}

impl ModelError {
    /// Returns the input that was rejected.
    pub fn input(&self) -> &str {
        match self {
            ModelError::Unparseable { input } | ModelError::Illegal { input, .. } => input,
        }
    }
}
