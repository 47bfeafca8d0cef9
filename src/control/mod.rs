//! Turn-notification and move-application protocol.

mod action;
mod bootstrap;
mod controller;
mod invariants;
mod model;
mod notifier;
mod side;
mod status;

pub use action::{Move, MoveError};
pub use bootstrap::start_session;
pub use controller::{GameController, GameSession, status_text};
pub use invariants::{
    AlternatingMoverInvariant, ContiguousSequenceInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants, TurnMatchesHistoryInvariant,
};
pub use model::{GameModel, ModelError, ModelMoveReport};
pub use notifier::{MultiView, SessionSnapshot, ViewError, ViewNotifier};
pub use side::Side;
pub use status::GameStatus;
