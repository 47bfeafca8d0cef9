//! Short rules reference for the `rules for <topic>` command.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Topics with a rules explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RuleTopic {
    /// Castling.
    Castling,
    /// Pawn movement.
    Pawn,
    /// King movement.
    King,
    /// Queen movement.
    Queen,
    /// Rook movement.
    Rook,
    /// Bishop movement.
    Bishop,
    /// Knight movement.
    Knight,
    /// En passant capture.
    #[strum(to_string = "en passant", serialize = "enpassant")]
    EnPassant,
    /// Pawn promotion.
    Promotion,
}

impl RuleTopic {
    /// Explanation for this topic.
    pub fn text(self) -> &'static str {
        match self {
            RuleTopic::Castling => {
                "Castling moves the king two squares towards a rook and puts that rook on the \
                 square the king crossed. It is allowed only if neither piece has moved, the \
                 squares between them are empty, and the king is not in check, does not pass \
                 through an attacked square, and does not land in check."
            }
            RuleTopic::Pawn => {
                "A pawn moves one square straight ahead onto an empty square, or two squares from \
                 its starting rank if both are empty. It captures one square diagonally forward. \
                 See also en passant and promotion."
            }
            RuleTopic::King => {
                "The king moves one square in any direction and may never move into check. \
                 See also castling."
            }
            RuleTopic::Queen => {
                "The queen moves any number of squares along a rank, file or diagonal without \
                 jumping over pieces."
            }
            RuleTopic::Rook => {
                "The rook moves any number of squares along a rank or file without jumping over \
                 pieces."
            }
            RuleTopic::Bishop => {
                "The bishop moves any number of squares diagonally without jumping over pieces."
            }
            RuleTopic::Knight => {
                "The knight jumps in an L shape: two squares along a rank or file, then one \
                 square sideways. It is the only piece that jumps over others."
            }
            RuleTopic::EnPassant => {
                "When a pawn advances two squares and lands beside an enemy pawn, that pawn may \
                 capture it on the very next move as if it had advanced only one square, moving \
                 diagonally onto the square that was skipped."
            }
            RuleTopic::Promotion => {
                "A pawn reaching the last rank is replaced by a queen, rook, bishop or knight of \
                 the same colour. Write the piece after the move: e8=Q or e7e8q."
            }
        }
    }
}

/// Rules for `topic`, or the list of known topics if it is not recognised.
pub fn rules_for(topic: &str) -> String {
    match topic.trim().parse::<RuleTopic>() {
        Ok(topic) => topic.text().to_string(),
        Err(_) => {
            let topics = RuleTopic::iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("You can get rules for {}", topics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_topics() {
        assert_eq!(rules_for("Knight"), RuleTopic::Knight.text());
        assert_eq!(rules_for("en passant"), RuleTopic::EnPassant.text());
    }

    #[test]
    fn test_unknown_topic_lists_all() {
        let text = rules_for("checkers");
        assert!(text.starts_with("You can get rules for castling, pawn"));
        assert!(text.ends_with("en passant, promotion"));
    }
}
