//! Text view writing status lines to any `Write` sink.

use crate::control::{GameController, GameStatus, Move, SessionSnapshot, ViewError, ViewNotifier};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Weak;
use tracing::{debug, instrument};

/// Console front end.
///
/// Prints a status line per move and, when enabled, the board as rendered by
/// the model.
pub struct ConsoleView<W: Write> {
    out: RefCell<W>,
    welcome: String,
    show_board: bool,
    controller: RefCell<Weak<GameController>>,
}

impl<W: Write> ConsoleView<W> {
    /// Creates a console view writing to `out`.
    #[instrument(skip(out))]
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            welcome: String::new(),
            show_board: false,
            controller: RefCell::new(Weak::new()),
        }
    }

    /// Sets the greeting printed on every initial render.
    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Prints the board after every move.
    pub fn with_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    fn write_block(&self, text: &str) -> Result<(), ViewError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", text)
            .and_then(|_| out.flush())
            .map_err(|e| ViewError::new("console", e.to_string()))
    }

    fn board_text(&self) -> Option<String> {
        if !self.show_board {
            return None;
        }
        let controller = self.controller.borrow().upgrade()?;
        Some(controller.position_text()).filter(|text| !text.is_empty())
    }
}

impl<W: Write> ViewNotifier for ConsoleView<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn attach(&self, controller: Weak<GameController>) {
        debug!("Console view attached");
        *self.controller.borrow_mut() = controller;
    }

    fn on_initial_render(&self, snapshot: &SessionSnapshot) -> Result<(), ViewError> {
        if !self.welcome.is_empty() {
            self.write_block(&self.welcome)?;
        }
        if self.show_board && !snapshot.position_text().is_empty() {
            self.write_block(snapshot.position_text())?;
        }
        self.write_block(&format!("Next move: {}", snapshot.current_turn()))
    }

    fn on_move_applied(&self, _mv: &Move, status_text: &str) -> Result<(), ViewError> {
        if let Some(board) = self.board_text() {
            self.write_block(&board)?;
        }
        self.write_block(status_text)
    }

    fn on_game_over(&self, status: GameStatus) -> Result<(), ViewError> {
        self.write_block(&format!(
            "Game over ({}). Type 'restart' to start a new game.",
            status
        ))
    }
}
