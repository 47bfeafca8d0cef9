//! Console front end: command parsing, text and JSON views, and the input loop.

mod command;
mod json;
mod record;
mod repl;
mod rules_text;
mod view;

pub use command::{Command, HELP_TEXT};
pub use json::JsonLinesView;
pub use record::{EMPTY_RECORD, format_record};
pub use repl::{ConsoleExit, run_console};
pub use rules_text::{RuleTopic, rules_for};
pub use view::ConsoleView;
