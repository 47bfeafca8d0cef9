//! JSON Lines view: one event object per notification.

use crate::control::{GameStatus, Move, SessionSnapshot, ViewError, ViewNotifier};
use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;
use tracing::instrument;

/// Event written by [`JsonLinesView`].
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ViewEvent<'a> {
    InitialRender {
        snapshot: &'a SessionSnapshot,
    },
    MoveApplied {
        #[serde(rename = "move")]
        mv: &'a Move,
        status_text: &'a str,
    },
    GameOver {
        status: GameStatus,
    },
}

/// Machine-readable view for spectators and log processing.
pub struct JsonLinesView<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonLinesView<W> {
    /// Creates a view writing JSON Lines to `out`.
    #[instrument(skip(out))]
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    fn emit(&self, event: &ViewEvent<'_>) -> Result<(), ViewError> {
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, event)
            .map_err(|e| ViewError::new("json", e.to_string()))?;
        out.write_all(b"\n")
            .and_then(|_| out.flush())
            .map_err(|e| ViewError::new("json", e.to_string()))
    }
}

impl<W: Write> ViewNotifier for JsonLinesView<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn on_initial_render(&self, snapshot: &SessionSnapshot) -> Result<(), ViewError> {
        self.emit(&ViewEvent::InitialRender { snapshot })
    }

    fn on_move_applied(&self, mv: &Move, status_text: &str) -> Result<(), ViewError> {
        self.emit(&ViewEvent::MoveApplied { mv, status_text })
    }

    fn on_game_over(&self, status: GameStatus) -> Result<(), ViewError> {
        self.emit(&ViewEvent::GameOver { status })
    }
}
