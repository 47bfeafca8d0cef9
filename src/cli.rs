//! Command-line interface for chess_control.

use chess_control::ViewKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chess Control - two-player chess in the terminal
#[derive(Parser, Debug)]
#[command(name = "chess_control")]
#[command(about = "Two-player chess with pluggable views", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the session config (TOML). Defaults apply if it does not exist.
    #[arg(short, long, global = true, default_value = "chess_control.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, reading commands from stdin
    Play {
        /// Views to attach (overrides the config file); repeat for several
        #[arg(long = "view", value_enum)]
        views: Vec<ViewKind>,

        /// Destination of the JSON view
        #[arg(long)]
        json_log: Option<PathBuf>,

        /// Print the board after every move
        #[arg(long)]
        show_board: bool,
    },

    /// Play the commands in a file (one per line), then print the record
    Replay {
        /// File with one move or command per line
        path: PathBuf,
    },

    /// Print the rules for a topic
    Rules {
        /// Topic, e.g. "castling" or "en passant"
        topic: Vec<String>,
    },
}
