//! Shared fakes for integration tests.

#![allow(dead_code)]

use chess_control::{
    GameController, GameModel, GameStatus, ModelError, ModelMoveReport, Move, MoveError,
    SessionSnapshot, Side, ViewError, ViewNotifier,
};
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::{Rc, Weak};

/// Model whose verdicts are spelled out by the input text.
///
/// - `illegal...` is rejected
/// - `check`, `mate`, `stalemate`, `resign`, `draw` set that status
/// - anything else is a quiet legal move
#[derive(Debug, Default)]
pub struct ScriptedModel {
    black_to_move: bool,
    pub calls: Rc<Cell<usize>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_to_move(&self) -> Side {
        if self.black_to_move {
            Side::Black
        } else {
            Side::White
        }
    }

    /// Model plus a handle on its call counter.
    pub fn with_counter() -> (Self, Rc<Cell<usize>>) {
        let model = Self::new();
        let calls = model.calls.clone();
        (model, calls)
    }
}

impl GameModel for ScriptedModel {
    fn apply_move(&mut self, input: &str) -> Result<ModelMoveReport, ModelError> {
        self.calls.set(self.calls.get() + 1);

        if input.starts_with("illegal") {
            return Err(ModelError::Illegal {
                input: input.to_string(),
                reason: "scripted rejection".to_string(),
            });
        }

        let status = match input {
            "check" => GameStatus::Check,
            "mate" => GameStatus::Checkmate,
            "stalemate" => GameStatus::Stalemate,
            "resign" => GameStatus::Resigned,
            "draw" => GameStatus::Drawn,
            _ => GameStatus::InProgress,
        };

        self.black_to_move = !self.black_to_move;
        Ok(ModelMoveReport::new(input.to_string(), status, self.side_to_move()))
    }

    fn reset(&mut self) {
        self.black_to_move = false;
    }

    fn position_text(&self) -> String {
        format!("scripted position, {} to move", self.side_to_move())
    }
}

/// One observed callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Initial(SessionSnapshot),
    Applied(Move, String),
    GameOver(GameStatus),
}

/// Event log shared between several views, tagged by view name.
pub type SharedLog = Rc<RefCell<Vec<(String, Event)>>>;

/// View that records every callback.
pub struct RecordingView {
    name: String,
    log: SharedLog,
    fail_moves: bool,
    fail_game_over: bool,
    reenter_with: Option<String>,
    controller: RefCell<Weak<GameController>>,
    pub reentry_results: RefCell<Vec<Result<Move, MoveError>>>,
}

impl RecordingView {
    pub fn new(name: &str, log: &SharedLog) -> Rc<Self> {
        Rc::new(Self::build(name, log))
    }

    /// A view whose `on_move_applied` always fails.
    pub fn failing(name: &str, log: &SharedLog) -> Rc<Self> {
        Rc::new(Self {
            fail_moves: true,
            ..Self::build(name, log)
        })
    }

    /// A view whose `on_game_over` always fails.
    pub fn failing_game_over(name: &str, log: &SharedLog) -> Rc<Self> {
        Rc::new(Self {
            fail_game_over: true,
            ..Self::build(name, log)
        })
    }

    /// A view that calls back into the controller from `on_move_applied`.
    pub fn reentrant(name: &str, log: &SharedLog, input: &str) -> Rc<Self> {
        Rc::new(Self {
            reenter_with: Some(input.to_string()),
            ..Self::build(name, log)
        })
    }

    fn build(name: &str, log: &SharedLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            fail_moves: false,
            fail_game_over: false,
            reenter_with: None,
            controller: RefCell::new(Weak::new()),
            reentry_results: RefCell::new(Vec::new()),
        }
    }

    /// Returns true once a live controller has been handed to this view.
    pub fn is_attached(&self) -> bool {
        self.controller.borrow().strong_count() > 0
    }

    /// Events seen by this view only.
    pub fn events(&self) -> Vec<Event> {
        self.log
            .borrow()
            .iter()
            .filter(|(name, _)| *name == self.name)
            .map(|(_, event)| event.clone())
            .collect()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push((self.name.clone(), event));
    }
}

impl ViewNotifier for RecordingView {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, controller: Weak<GameController>) {
        *self.controller.borrow_mut() = controller;
    }

    fn on_initial_render(&self, snapshot: &SessionSnapshot) -> Result<(), ViewError> {
        self.record(Event::Initial(snapshot.clone()));
        Ok(())
    }

    fn on_move_applied(&self, mv: &Move, status_text: &str) -> Result<(), ViewError> {
        self.record(Event::Applied(mv.clone(), status_text.to_string()));

        if let Some(input) = &self.reenter_with
            && let Some(controller) = self.controller.borrow().upgrade()
        {
            let result = controller.apply_move(input);
            self.reentry_results.borrow_mut().push(result);
        }

        if self.fail_moves {
            Err(ViewError::new(self.name.clone(), "render failed"))
        } else {
            Ok(())
        }
    }

    fn on_game_over(&self, status: GameStatus) -> Result<(), ViewError> {
        self.record(Event::GameOver(status));
        if self.fail_game_over {
            Err(ViewError::new(self.name.clone(), "game-over screen failed"))
        } else {
            Ok(())
        }
    }
}

pub fn new_log() -> SharedLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// In-memory writer that can be handed to a view and read back later.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("utf-8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writer that always fails, for view error paths.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
