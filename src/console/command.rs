//! Console command parsing.

use tracing::instrument;

/// Help text listing every console command.
pub const HELP_TEXT: &str = "\
Enter commands:
  a move in SAN (e4, Nf3, O-O), coordinates (e2e4) or long form (Ng1-f3)
  'resign'            give up the game
  'print'             print the game record
  'restart'           start a new game
  'rules for <topic>' castling, pawn, king, queen, rook, bishop, knight, en passant, promotion
  'help'              show this text
  'quit'              leave";

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// Show the command list.
    Help,
    /// Print the game record.
    Print,
    /// Start a new game.
    Restart,
    /// Leave the session.
    Quit,
    /// Show rules for a topic.
    Rules(String),
    /// Anything else is passed to the game as a move.
    Move(String),
}

impl Command {
    /// Parses a line. Keywords are case-insensitive; moves are kept verbatim
    /// because SAN is case-sensitive (`Bc4` vs `bc4`).
    #[instrument]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let lower = trimmed.to_ascii_lowercase();

        match lower.as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "print" => Command::Print,
            "restart" => Command::Restart,
            "quit" | "exit" => Command::Quit,
            _ => match lower.strip_prefix("rules for ") {
                Some(topic) => Command::Rules(topic.trim().to_string()),
                None => Command::Move(trimmed.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(Command::parse("  HELP "), Command::Help);
        assert_eq!(Command::parse("Print"), Command::Print);
        assert_eq!(Command::parse("restart"), Command::Restart);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
    }

    #[test]
    fn test_rules_topic() {
        assert_eq!(
            Command::parse("Rules for En Passant"),
            Command::Rules("en passant".to_string())
        );
    }

    #[test]
    fn test_moves_keep_case() {
        assert_eq!(Command::parse(" Bc4 "), Command::Move("Bc4".to_string()));
        assert_eq!(Command::parse("resign"), Command::Move("resign".to_string()));
    }
}
