//! Standard chess model backed by `shakmaty`.

use crate::control::{GameModel, GameStatus, ModelError, ModelMoveReport, Side};
use shakmaty::san::San;
use shakmaty::{Chess, Color, File, Move, Position, Rank, Role, Square};
use tracing::{debug, instrument};

/// Input that resigns the game for the side to move.
const RESIGN: &str = "resign";

/// Standard chess from the initial position.
///
/// Accepts SAN (`Nf3`, `exd5`, `O-O`), coordinate notation (`e2e4`,
/// `e7e8q`) and long algebraic notation (`e2-e4`, `Ng1-f3`, `e4xd5`).
#[derive(Debug, Clone, Default)]
pub struct ChessModel {
    position: Chess,
}

impl ChessModel {
    /// Creates a model at the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Side to move in the current position.
    pub fn turn(&self) -> Side {
        side_of(self.position.turn())
    }

    /// Number of legal moves in the current position.
    pub fn legal_move_count(&self) -> usize {
        self.position.legal_moves().len()
    }

    /// Finds the legal move named by `text`.
    #[instrument(skip(self))]
    fn parse_move(&self, text: &str) -> Result<Move, ModelError> {
        if let Some(found) = self.parse_coordinates(text) {
            debug!("Read as coordinate notation");
            return found;
        }

        let san: San = text.parse().map_err(|_| ModelError::Unparseable {
            input: text.to_string(),
        })?;

        san.to_move(&self.position).map_err(|e| ModelError::Illegal {
            input: text.to_string(),
            reason: format!("{} is not playable here ({})", text, e),
        })
    }

    /// Matches `e2e4`, `E2-E4`, `Ng1-f3`, `e4xd5`, `e7e8q` or `e7-e8=Q`
    /// against the legal moves.
    ///
    /// Returns `None` if `text` is not written in coordinates at all. A
    /// leading piece letter must name the piece on the start square.
    fn parse_coordinates(&self, text: &str) -> Option<Result<Move, ModelError>> {
        let cleaned: String = text
            .chars()
            .filter(|c| !matches!(c, '-' | 'x' | 'X' | '='))
            .collect();
        if !cleaned.is_ascii() {
            return None;
        }

        let (piece, (from, to, promotion)) = piece_prefix(&cleaned)
            .and_then(|(role, rest)| coordinates(rest).map(|c| (Some(role), c)))
            .or_else(|| coordinates(&cleaned).map(|c| (None, c)))?;

        let found = self.position.legal_moves().into_iter().find(|m| {
            m.from() == Some(from)
                && self.king_target(m) == to
                && m.promotion() == promotion
                && piece.is_none_or(|role| m.role() == role)
        });

        Some(found.ok_or_else(|| {
            let on_start = self.position.board().piece_at(from).map(|p| p.role);
            let reason = match piece {
                Some(role) if on_start != Some(role) => format!(
                    "there is no {} on {}",
                    role.char().to_ascii_uppercase(),
                    from
                ),
                _ => format!("{}-{} is not a legal move", from, to),
            };
            ModelError::Illegal {
                input: text.to_string(),
                reason,
            }
        }))
    }

    /// Destination square as a player would name it (castling lands the
    /// king on the g- or c-file).
    fn king_target(&self, mv: &Move) -> Square {
        match mv {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                Square::from_coords(file, king.rank())
            }
            other => other.to(),
        }
    }

    fn status(&self) -> GameStatus {
        let pos = &self.position;
        if pos.is_checkmate() {
            GameStatus::Checkmate
        } else if pos.is_stalemate() {
            GameStatus::Stalemate
        } else if pos.is_insufficient_material() {
            GameStatus::Drawn
        } else if pos.is_check() {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }
}

impl GameModel for ChessModel {
    #[instrument(skip(self))]
    fn apply_move(&mut self, input: &str) -> Result<ModelMoveReport, ModelError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ModelError::Unparseable {
                input: input.to_string(),
            });
        }

        if text.eq_ignore_ascii_case(RESIGN) {
            let resigning = self.turn();
            debug!(side = %resigning, "Resignation");
            return Ok(ModelMoveReport::new(
                "resigns".to_string(),
                GameStatus::Resigned,
                resigning.opponent(),
            ));
        }

        let mv = self.parse_move(text)?;
        let san = San::from_move(&self.position, &mv);

        let next = self
            .position
            .clone()
            .play(&mv)
            .map_err(|e| ModelError::Illegal {
                input: text.to_string(),
                reason: e.to_string(),
            })?;
        self.position = next;

        let status = self.status();
        let suffix = match status {
            GameStatus::Checkmate => "#",
            GameStatus::Check => "+",
            _ => "",
        };

        Ok(ModelMoveReport::new(
            format!("{}{}", san, suffix),
            status,
            self.turn(),
        ))
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        self.position = Chess::default();
    }

    fn position_text(&self) -> String {
        let board = self.position.board();
        let mut text = String::new();

        for rank in (0..8u32).rev() {
            text.push_str(&format!("{} ", rank + 1));
            for file in 0..8u32 {
                let square = Square::from_coords(File::new(file), Rank::new(rank));
                let symbol = board.piece_at(square).map_or('.', |piece| piece.char());
                text.push(symbol);
                if file < 7 {
                    text.push(' ');
                }
            }
            text.push('\n');
        }
        text.push_str("  a b c d e f g h");
        text
    }
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

/// Splits a leading uppercase piece letter (`N` in `Ng1f3`) from the rest.
fn piece_prefix(text: &str) -> Option<(Role, &str)> {
    let letter = text.chars().next()?;
    if !matches!(letter, 'P' | 'N' | 'B' | 'R' | 'Q' | 'K') {
        return None;
    }
    let role = Role::from_char(letter.to_ascii_lowercase())?;
    Some((role, &text[1..]))
}

/// Reads `e2e4` or `e7e8q` in any case.
fn coordinates(body: &str) -> Option<(Square, Square, Option<Role>)> {
    if !(4..=5).contains(&body.len()) {
        return None;
    }
    let body = body.to_ascii_lowercase();

    let from: Square = body[0..2].parse().ok()?;
    let to: Square = body[2..4].parse().ok()?;
    let promotion = match body[4..].chars().next() {
        Some(c) => Some(Role::from_char(c)?),
        None => None,
    };
    Some((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(model: &mut ChessModel, moves: &[&str]) -> ModelMoveReport {
        let mut last = None;
        for mv in moves {
            last = Some(model.apply_move(mv).unwrap_or_else(|e| panic!("{mv}: {e}")));
        }
        last.expect("at least one move")
    }

    #[test]
    fn test_notations_agree() {
        for input in ["e4", "e2e4", "e2-e4", "Pe2-e4"] {
            let mut model = ChessModel::new();
            let report = model.apply_move(input).unwrap();
            assert_eq!(report.description(), "e4", "input {input}");
            assert_eq!(report.next_turn(), Side::Black);
            assert_eq!(report.status(), GameStatus::InProgress);
        }
    }

    #[test]
    fn test_knight_long_algebraic() {
        let mut model = ChessModel::new();
        let report = model.apply_move("Ng1-f3").unwrap();
        assert_eq!(report.description(), "Nf3");
    }

    #[test]
    fn test_wrong_piece_letter_is_illegal() {
        let mut model = ChessModel::new();
        let before = model.position_text();

        for input in ["Qe2-e4", "Bg1-f3", "Ke2e4"] {
            let err = model.apply_move(input).unwrap_err();
            assert!(
                matches!(&err, ModelError::Illegal { reason, .. } if reason.starts_with("there is no")),
                "{input}: {err:?}"
            );
        }
        assert_eq!(model.position_text(), before);
        assert_eq!(model.turn(), Side::White);

        assert_eq!(model.apply_move("Pe2-e4").unwrap().description(), "e4");
    }

    #[test]
    fn test_coordinates_ignore_case() {
        let mut model = ChessModel::new();
        assert_eq!(model.apply_move("E2-E4").unwrap().description(), "e4");
        assert_eq!(model.apply_move("B7B5").unwrap().description(), "b5");
        assert_eq!(model.apply_move("NG1-F3").unwrap().description(), "Nf3");
    }

    #[test]
    fn test_uppercase_pawn_promotion_on_b_file() {
        let mut model = ChessModel::new();
        let report = play(
            &mut model,
            &["a4", "b5", "axb5", "a6", "bxa6", "Bb7", "axb7", "Nc6", "B7A8Q"],
        );
        assert_eq!(report.description(), "bxa8=Q");
    }

    #[test]
    fn test_capture_notation() {
        let mut model = ChessModel::new();
        let report = play(&mut model, &["e4", "d5", "e4xd5"]);
        assert_eq!(report.description(), "exd5");
    }

    #[test]
    fn test_castling_by_coordinates() {
        let mut model = ChessModel::new();
        let report = play(&mut model, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "e1g1"]);
        assert_eq!(report.description(), "O-O");
    }

    #[test]
    fn test_illegal_move_leaves_position() {
        let mut model = ChessModel::new();
        let before = model.position_text();

        let err = model.apply_move("e2e5").unwrap_err();
        assert!(matches!(err, ModelError::Illegal { .. } | ModelError::Unparseable { .. }));
        assert_eq!(model.position_text(), before);
        assert_eq!(model.turn(), Side::White);
    }

    #[test]
    fn test_garbage_is_unparseable() {
        let mut model = ChessModel::new();
        assert!(matches!(
            model.apply_move("hello world"),
            Err(ModelError::Unparseable { .. })
        ));
        assert!(matches!(model.apply_move("   "), Err(ModelError::Unparseable { .. })));
    }

    #[test]
    fn test_fools_mate() {
        let mut model = ChessModel::new();
        let report = play(&mut model, &["f3", "e5", "g4", "Qh4"]);
        assert_eq!(report.description(), "Qh4#");
        assert_eq!(report.status(), GameStatus::Checkmate);
        assert_eq!(model.legal_move_count(), 0);
    }

    #[test]
    fn test_check_reported() {
        let mut model = ChessModel::new();
        let report = play(&mut model, &["e4", "f5", "Qh5"]);
        assert_eq!(report.description(), "Qh5+");
        assert_eq!(report.status(), GameStatus::Check);
    }

    #[test]
    fn test_resign() {
        let mut model = ChessModel::new();
        play(&mut model, &["e4"]);
        let report = model.apply_move("Resign").unwrap();
        assert_eq!(report.status(), GameStatus::Resigned);
        assert_eq!(report.next_turn(), Side::White);
    }

    #[test]
    fn test_reset_and_board_text() {
        let mut model = ChessModel::new();
        let start = model.position_text();
        assert!(start.starts_with("8 r n b q k b n r"));
        assert!(start.ends_with("  a b c d e f g h"));

        play(&mut model, &["d4"]);
        assert_ne!(model.position_text(), start);

        model.reset();
        assert_eq!(model.position_text(), start);
        assert_eq!(model.turn(), Side::White);
    }
}
