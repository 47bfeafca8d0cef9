//! Game status as reported by the model after each move.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Status of a game session.
///
/// Sessions start `InProgress` and may move between `InProgress` and
/// `Check` any number of times. The remaining variants are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Game is ongoing and the side to move is not in check.
    #[default]
    #[strum(serialize = "in progress")]
    InProgress,
    /// Game is ongoing and the side to move is in check.
    Check,
    /// The side to move has been checkmated.
    Checkmate,
    /// The side to move has no legal move but is not in check.
    Stalemate,
    /// A player resigned.
    Resigned,
    /// Drawn position (e.g. insufficient material).
    Drawn,
}

impl GameStatus {
    /// Returns true if no further moves may be applied.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Resigned | GameStatus::Drawn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<GameStatus> = GameStatus::iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                GameStatus::Checkmate,
                GameStatus::Stalemate,
                GameStatus::Resigned,
                GameStatus::Drawn
            ]
        );
    }

    #[test]
    fn test_default_is_in_progress() {
        assert_eq!(GameStatus::default(), GameStatus::InProgress);
        assert_eq!(GameStatus::InProgress.to_string(), "in progress");
        assert_eq!(GameStatus::Checkmate.to_string(), "checkmate");
    }
}
