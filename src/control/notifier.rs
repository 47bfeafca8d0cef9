//! View notification contract.
//!
//! Views are shared as `Rc<dyn ViewNotifier>` so the controller can fan out
//! to any mix of front ends. All callbacks take `&self`; a view that keeps
//! state uses interior mutability.

use super::controller::GameController;
use super::{GameStatus, Move, Side};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, instrument, warn};

/// Callbacks a view implements to follow a game session.
pub trait ViewNotifier {
    /// Short name used in logs and error reports.
    fn name(&self) -> &str {
        "view"
    }

    /// Receives the non-owning back-reference to the controller on registration.
    fn attach(&self, _controller: Weak<GameController>) {}

    /// Draws the starting position. Sent on bootstrap and after a restart.
    fn on_initial_render(&self, _snapshot: &SessionSnapshot) -> Result<(), ViewError> {
        Ok(())
    }

    /// Called once per applied half-move, in sequence order.
    fn on_move_applied(&self, mv: &Move, status_text: &str) -> Result<(), ViewError>;

    /// Called once after the move that ended the game.
    fn on_game_over(&self, status: GameStatus) -> Result<(), ViewError>;
}

/// State passed to views with the initial-render signal.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct SessionSnapshot {
    current_turn: Side,
    status: GameStatus,
    moves_played: usize,
    position_text: String,
}

impl SessionSnapshot {
    pub(crate) fn new(
        current_turn: Side,
        status: GameStatus,
        moves_played: usize,
        position_text: String,
    ) -> Self {
        Self {
            current_turn,
            status,
            moves_played,
            position_text,
        }
    }
}

/// Failure reported by a view callback.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("View '{}' failed: {}", view, message)]
pub struct ViewError {
    /// Name of the failing view.
    pub view: String,
    /// What went wrong.
    pub message: String,
}

impl ViewError {
    /// Creates a new view error.
    pub fn new(view: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            message: message.into(),
        }
    }
}

/// Returns true if both handles point at the same view.
pub(crate) fn same_view(a: &Rc<dyn ViewNotifier>, b: &Rc<dyn ViewNotifier>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Fan-out view: forwards every callback to its children in order.
///
/// Lets several front ends sit behind one registration, e.g. one board per
/// player plus a spectator log. Children pushed after registration are
/// attached to the same controller.
#[derive(Default)]
pub struct MultiView {
    name: String,
    children: RefCell<Vec<Rc<dyn ViewNotifier>>>,
    controller: RefCell<Weak<GameController>>,
}

impl MultiView {
    /// Creates an empty fan-out view.
    #[instrument(skip(name))]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: RefCell::new(Vec::new()),
            controller: RefCell::new(Weak::new()),
        }
    }

    /// Adds a child view. Returns false if it was already present.
    #[instrument(skip_all, fields(multi = %self.name, child = %child.name()))]
    pub fn push(&self, child: Rc<dyn ViewNotifier>) -> bool {
        {
            let mut children = self.children.borrow_mut();
            if children.iter().any(|c| same_view(c, &child)) {
                debug!("Child view already present");
                return false;
            }
            children.push(child.clone());
        }

        let controller = self.controller.borrow().clone();
        if controller.strong_count() > 0 {
            debug!("Attaching late child view");
            child.attach(controller);
        }
        true
    }

    /// Number of child views.
    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    /// Returns true if there are no child views.
    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Calls `f` on every child, collecting failures into one error.
    fn fan_out(
        &self,
        f: impl Fn(&dyn ViewNotifier) -> Result<(), ViewError>,
    ) -> Result<(), ViewError> {
        let children = self.children.borrow().clone();
        let failures: Vec<ViewError> = children
            .iter()
            .filter_map(|child| f(&**child).err())
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        warn!(multi = %self.name, failed = failures.len(), "Child views failed");
        let message = failures
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ViewError::new(self.name.clone(), message))
    }
}

impl std::fmt::Debug for MultiView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiView")
            .field("name", &self.name)
            .field("children", &self.len())
            .finish()
    }
}

impl ViewNotifier for MultiView {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, controller: Weak<GameController>) {
        *self.controller.borrow_mut() = controller.clone();
        let children = self.children.borrow().clone();
        for child in &children {
            child.attach(controller.clone());
        }
    }

    fn on_initial_render(&self, snapshot: &SessionSnapshot) -> Result<(), ViewError> {
        self.fan_out(|child| child.on_initial_render(snapshot))
    }

    fn on_move_applied(&self, mv: &Move, status_text: &str) -> Result<(), ViewError> {
        self.fan_out(|child| child.on_move_applied(mv, status_text))
    }

    fn on_game_over(&self, status: GameStatus) -> Result<(), ViewError> {
        self.fan_out(|child| child.on_game_over(status))
    }
}
