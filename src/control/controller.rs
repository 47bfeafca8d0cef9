//! Game controller: the single writer of session state.
//!
//! The controller forwards inputs to the [`GameModel`], records accepted
//! half-moves in the [`GameSession`], and notifies every registered view.
//! It is used from one thread through `Rc`, with interior mutability so that
//! views holding a `Weak` back-reference can call into it.

use super::invariants::{InvariantSet, SessionInvariants};
use super::model::{GameModel, ModelMoveReport};
use super::notifier::{SessionSnapshot, ViewError, ViewNotifier, same_view};
use super::{GameStatus, Move, MoveError, Side};
use derive_getters::Getters;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Live state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct GameSession {
    current_turn: Side,
    move_history: Vec<Move>,
    status: GameStatus,
}

impl GameSession {
    /// Creates a fresh session: White to move, no history.
    #[instrument]
    pub fn new() -> Self {
        Self {
            current_turn: Side::White,
            move_history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(current_turn: Side, move_history: Vec<Move>, status: GameStatus) -> Self {
        Self {
            current_turn,
            move_history,
            status,
        }
    }

    /// Returns true once the status is terminal.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Appends the reported move and advances the turn.
    fn commit(&mut self, report: &ModelMoveReport) -> Move {
        let mover = self.current_turn;
        let mv = Move::new(
            mover,
            report.description().to_string(),
            self.move_history.len(),
        );
        self.move_history.push(mv.clone());
        self.current_turn = mover.opponent();
        self.status = report.status();
        mv
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks the controller as busy for the lifetime of the guard.
struct InFlight<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Single authority over a game session's progression.
pub struct GameController {
    model: RefCell<Box<dyn GameModel>>,
    session: RefCell<GameSession>,
    views: RefCell<Vec<Rc<dyn ViewNotifier>>>,
    in_flight: Cell<bool>,
}

impl GameController {
    /// Creates a controller with a fresh session over `model`.
    #[instrument(skip(model))]
    pub fn new(model: impl GameModel + 'static) -> Rc<Self> {
        info!("Creating game controller");
        Rc::new(Self {
            model: RefCell::new(Box::new(model)),
            session: RefCell::new(GameSession::new()),
            views: RefCell::new(Vec::new()),
            in_flight: Cell::new(false),
        })
    }

    /// Registers a view. Returns false if the same view was already registered.
    ///
    /// The view receives a `Weak` back-reference through [`ViewNotifier::attach`].
    #[instrument(skip_all, fields(view = %view.name()))]
    pub fn register_view(self: &Rc<Self>, view: Rc<dyn ViewNotifier>) -> bool {
        {
            let mut views = self.views.borrow_mut();
            if views.iter().any(|v| same_view(v, &view)) {
                debug!("View already registered");
                return false;
            }
            views.push(view.clone());
        }

        view.attach(Rc::downgrade(self));
        info!(views = self.view_count(), "Registered view");
        true
    }

    /// Applies one half-move.
    ///
    /// On success the move is recorded, the turn flips, the status is
    /// refreshed from the model and every view is notified before this
    /// returns. `Illegal`, `GameOver` and `Busy` leave the session untouched.
    /// `NotificationFailed` means the move was committed but a view failed.
    #[instrument(skip(self))]
    pub fn apply_move(&self, input: &str) -> Result<Move, MoveError> {
        let _guard = InFlight::enter(&self.in_flight).ok_or_else(|| {
            warn!("Rejected move while another is in flight");
            MoveError::Busy
        })?;

        let status = self.session.borrow().status;
        if status.is_terminal() {
            warn!(%status, "Rejected move after game over");
            return Err(MoveError::GameOver(status));
        }

        let report = self
            .model
            .borrow_mut()
            .apply_move(input)
            .map_err(|e| {
                warn!(error = %e, "Model rejected move");
                MoveError::Illegal {
                    input: input.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let (mv, status) = {
            let mut session = self.session.borrow_mut();
            let mv = session.commit(&report);

            if report.next_turn() != session.current_turn {
                warn!(
                    model_turn = %report.next_turn(),
                    session_turn = %session.current_turn,
                    "Model disagrees about the side to move"
                );
            }

            debug_assert!(
                SessionInvariants::check_all(&*session).is_ok(),
                "Session invariants violated: {:?}",
                SessionInvariants::check_all(&*session)
            );

            (mv, session.status)
        };

        info!(
            sequence = mv.sequence_number(),
            mover = %mv.mover(),
            description = mv.description(),
            %status,
            "Move applied"
        );

        let failures = self.notify_all(&mv, status);
        if failures.is_empty() {
            Ok(mv)
        } else {
            Err(MoveError::NotificationFailed {
                applied: Some(mv),
                failures,
            })
        }
    }

    /// Sends the initial-render signal to every view.
    #[instrument(skip(self))]
    pub fn render_initial(&self) -> Result<(), MoveError> {
        let _guard = InFlight::enter(&self.in_flight).ok_or(MoveError::Busy)?;
        self.broadcast_initial()
    }

    /// Starts a new game: resets the model, replaces the session and
    /// re-sends the initial render.
    #[instrument(skip(self))]
    pub fn restart(&self) -> Result<(), MoveError> {
        let _guard = InFlight::enter(&self.in_flight).ok_or_else(|| {
            warn!("Rejected restart while a move is in flight");
            MoveError::Busy
        })?;

        self.model.borrow_mut().reset();
        *self.session.borrow_mut() = GameSession::new();
        info!("Session restarted");

        self.broadcast_initial()
    }

    /// Current game status.
    pub fn current_status(&self) -> GameStatus {
        self.session.borrow().status
    }

    /// Side to move.
    pub fn current_turn(&self) -> Side {
        self.session.borrow().current_turn
    }

    /// Copy of the move history.
    pub fn history(&self) -> Vec<Move> {
        self.session.borrow().move_history.clone()
    }

    /// Number of half-moves applied so far.
    pub fn move_count(&self) -> usize {
        self.session.borrow().move_history.len()
    }

    /// Copy of the whole session state.
    pub fn session(&self) -> GameSession {
        self.session.borrow().clone()
    }

    /// Model's rendering of the current position.
    pub fn position_text(&self) -> String {
        self.model.borrow().position_text()
    }

    /// Returns true while a move or restart is being processed.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Number of registered views.
    pub fn view_count(&self) -> usize {
        self.views.borrow().len()
    }

    fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.borrow();
        SessionSnapshot::new(
            session.current_turn,
            session.status,
            session.move_history.len(),
            self.position_text(),
        )
    }

    fn broadcast_initial(&self) -> Result<(), MoveError> {
        let snapshot = self.snapshot();
        let views = self.views.borrow().clone();
        debug!(views = views.len(), "Sending initial render");

        let failures: Vec<ViewError> = views
            .iter()
            .filter_map(|view| {
                view.on_initial_render(&snapshot).err().inspect(|e| {
                    warn!(view = %view.name(), error = %e, "View failed initial render");
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(MoveError::NotificationFailed {
                applied: None,
                failures,
            })
        }
    }

    /// Delivers `mv` to every view in registration order, then the game-over
    /// signal if `status` is terminal. Returns the failures.
    #[instrument(skip(self, mv), fields(sequence = mv.sequence_number()))]
    fn notify_all(&self, mv: &Move, status: GameStatus) -> Vec<ViewError> {
        // Snapshot so views may register others during the callback.
        let views = self.views.borrow().clone();
        let text = status_text(mv, status);
        let mut failures = Vec::new();

        for view in &views {
            if let Err(e) = view.on_move_applied(mv, &text) {
                warn!(view = %view.name(), error = %e, "View failed to apply move");
                failures.push(e);
            }
        }

        if status.is_terminal() {
            info!(%status, "Game over");
            for view in &views {
                if let Err(e) = view.on_game_over(status) {
                    warn!(view = %view.name(), error = %e, "View failed game-over update");
                    failures.push(e);
                }
            }
        }

        debug!(views = views.len(), failed = failures.len(), "Notified views");
        failures
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("views", &self.view_count())
            .field("in_flight", &self.in_flight.get())
            .finish()
    }
}

/// Status line shown to views after a move.
pub fn status_text(mv: &Move, status: GameStatus) -> String {
    let mover = mv.mover();
    let next = mover.opponent();
    let played = format!("{} played {}.", mover, mv.description());

    match status {
        GameStatus::InProgress => format!("{played} Next move: {next}"),
        GameStatus::Check => format!("{played} {next} is in check. Next move: {next}"),
        GameStatus::Checkmate => format!("{played} Checkmate, {mover} wins"),
        GameStatus::Stalemate => format!("{played} Stalemate, the game is drawn"),
        GameStatus::Resigned => format!("{mover} resigns. {next} wins"),
        GameStatus::Drawn => format!("{played} The game is drawn"),
    }
}
