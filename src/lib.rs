//! Chess Control - turn-notification and move-application layer for two-player chess
//!
//! The controller sits between a rules engine and any number of views. A move
//! flows from input, through the model, into the session history, and out to
//! every view in registration order.
//!
//! # Architecture
//!
//! - **Control**: [`GameController`], [`GameSession`], [`Move`] and the
//!   [`ViewNotifier`] contract
//! - **Rules**: [`ChessModel`], a [`GameModel`] backed by `shakmaty`
//! - **Console**: command parsing, [`ConsoleView`], [`JsonLinesView`] and the
//!   input loop
//! - **Config**: [`SessionConfig`] loaded from TOML
//!
//! # Example
//!
//! ```no_run
//! use chess_control::{ChessModel, ConsoleView, ViewNotifier, start_session};
//! use std::rc::Rc;
//!
//! let console: Rc<dyn ViewNotifier> = Rc::new(ConsoleView::new(std::io::stdout()));
//! let controller = start_session(ChessModel::new(), [console]);
//!
//! let mv = controller.apply_move("e4").expect("legal opening move");
//! assert_eq!(mv.sequence_number(), 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod control;
mod rules;

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig, ViewKind};

// Crate-level exports - Control protocol
pub use control::{
    AlternatingMoverInvariant, ContiguousSequenceInvariant, GameController, GameModel, GameSession,
    GameStatus, Invariant, InvariantSet, InvariantViolation, ModelError, ModelMoveReport, Move,
    MoveError, MultiView, SessionInvariants, SessionSnapshot, Side, TurnMatchesHistoryInvariant,
    ViewError, ViewNotifier, start_session, status_text,
};

// Crate-level exports - Rules
pub use rules::ChessModel;

// Crate-level exports - Console front end
pub use console::{
    Command, ConsoleExit, ConsoleView, EMPTY_RECORD, HELP_TEXT, JsonLinesView, RuleTopic,
    format_record, rules_for, run_console,
};
