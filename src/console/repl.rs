//! Line-driven console loop.

use super::command::{Command, HELP_TEXT};
use super::record::format_record;
use super::rules_text::rules_for;
use crate::control::{GameController, MoveError};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Why the console loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The player typed `quit`.
    Quit,
    /// Input ran out.
    EndOfInput,
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Moves go to the controller, whose views print the results. Replies that
/// are not view updates (help, records, errors) are written to `out`.
#[instrument(skip_all)]
pub fn run_console<R: BufRead, W: Write>(
    controller: &GameController,
    input: R,
    out: &mut W,
) -> Result<ConsoleExit> {
    info!("Console session started");

    for line in input.lines() {
        let line = line?;
        let command = Command::parse(&line);
        debug!(?command, "Read command");

        match command {
            Command::Empty => {}
            Command::Quit => {
                info!("Player quit");
                return Ok(ConsoleExit::Quit);
            }
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Print => writeln!(
                out,
                "{}",
                format_record(&controller.history(), controller.current_status())
            )?,
            Command::Rules(topic) => writeln!(out, "{}", rules_for(&topic))?,
            Command::Restart => match controller.restart() {
                Ok(()) => writeln!(out, "Start a new game!")?,
                Err(e) => report(out, &e)?,
            },
            Command::Move(text) => {
                if let Err(e) = controller.apply_move(&text) {
                    report(out, &e)?;
                }
            }
        }
        out.flush()?;
    }

    info!("Console input exhausted");
    Ok(ConsoleExit::EndOfInput)
}

fn report<W: Write>(out: &mut W, error: &MoveError) -> std::io::Result<()> {
    match error {
        MoveError::GameOver(status) => writeln!(
            out,
            "Game is already over ({}). Type 'restart' to start a new game.",
            status
        ),
        MoveError::NotificationFailed { failures, .. } => {
            warn!(failed = failures.len(), "Views failed after move");
            for failure in failures {
                writeln!(out, "Warning: {}", failure)?;
            }
            Ok(())
        }
        other => writeln!(out, "{}", other),
    }
}
