//! Game record formatting (`1. e4 e5 2. Nf3 ...`).

use crate::control::{GameStatus, Move, Side};

/// Text printed when no move has been played.
pub const EMPTY_RECORD: &str = "Game hasn't started yet.";

/// Formats the history as a numbered move list, followed by the result if
/// the game is over.
pub fn format_record(history: &[Move], status: GameStatus) -> String {
    if history.is_empty() {
        return EMPTY_RECORD.to_string();
    }

    let mut parts = Vec::with_capacity(history.len() + history.len() / 2 + 1);
    for mv in history {
        if mv.mover() == Side::White {
            parts.push(format!("{}.", mv.full_move_number()));
        }
        parts.push(mv.description().to_string());
    }

    if let Some(result) = result_marker(history, status) {
        parts.push(result.to_string());
    }
    parts.join(" ")
}

/// PGN-style result for a finished game.
fn result_marker(history: &[Move], status: GameStatus) -> Option<&'static str> {
    let last = history.last()?.mover();
    let winner = match status {
        GameStatus::Checkmate => last,
        GameStatus::Resigned => last.opponent(),
        GameStatus::Stalemate | GameStatus::Drawn => return Some("1/2-1/2"),
        GameStatus::InProgress | GameStatus::Check => return None,
    };
    Some(match winner {
        Side::White => "1-0",
        Side::Black => "0-1",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(descriptions: &[&str]) -> Vec<Move> {
        descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| Move::new(Side::for_sequence_number(i), d.to_string(), i))
            .collect()
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(format_record(&[], GameStatus::InProgress), EMPTY_RECORD);
    }

    #[test]
    fn test_numbering() {
        let history = moves(&["e4", "e5", "Nf3"]);
        assert_eq!(format_record(&history, GameStatus::InProgress), "1. e4 e5 2. Nf3");
    }

    #[test]
    fn test_results() {
        let mate = moves(&["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(
            format_record(&mate, GameStatus::Checkmate),
            "1. f3 e5 2. g4 Qh4# 0-1"
        );

        let resigned = moves(&["e4", "resigns"]);
        assert_eq!(
            format_record(&resigned, GameStatus::Resigned),
            "1. e4 resigns 1-0"
        );
    }
}
