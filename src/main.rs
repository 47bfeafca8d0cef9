//! Chess Control - console entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use chess_control::{
    ChessModel, ConsoleView, JsonLinesView, SessionConfig, ViewKind, ViewNotifier,
    format_record, rules_for, run_console, start_session,
};
use clap::Parser;
use cli::{Cli, Command};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::rc::Rc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = SessionConfig::load_or_default(&cli.config)?;
    init_tracing(config.log_filter());

    match cli.command.unwrap_or(Command::Play {
        views: Vec::new(),
        json_log: None,
        show_board: false,
    }) {
        Command::Play {
            views,
            json_log,
            show_board,
        } => {
            let mut config = config;
            if !views.is_empty() {
                config = config.with_views(views);
            }
            if let Some(path) = json_log {
                config = config.with_json_log_path(path);
            }
            if show_board {
                config = config.with_show_board(true);
            }
            run_play(&config)
        }
        Command::Replay { path } => run_replay(&config, &path),
        Command::Rules { topic } => {
            println!("{}", rules_for(&topic.join(" ")));
            Ok(())
        }
    }
}

/// Installs the tracing subscriber on stderr so stdout stays with the views.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Builds the views named in the config.
#[instrument(skip(config))]
fn build_views(config: &SessionConfig) -> Result<Vec<Rc<dyn ViewNotifier>>> {
    let mut views: Vec<Rc<dyn ViewNotifier>> = Vec::new();

    for kind in config.views() {
        match kind {
            ViewKind::Console => views.push(Rc::new(
                ConsoleView::new(io::stdout())
                    .with_welcome(config.welcome_text().clone())
                    .with_board(*config.show_board()),
            )),
            ViewKind::Json => {
                let path = config.json_log_path();
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                info!(path = %path.display(), "JSON view enabled");
                views.push(Rc::new(JsonLinesView::new(file)));
            }
        }
    }

    Ok(views)
}

/// Interactive game on stdin/stdout.
#[instrument(skip(config))]
fn run_play(config: &SessionConfig) -> Result<()> {
    let controller = start_session(ChessModel::new(), build_views(config)?);
    let stdin = io::stdin();
    run_console(&controller, stdin.lock(), &mut io::stdout())?;
    Ok(())
}

/// Feeds a file of commands through the console loop.
#[instrument(skip(config))]
fn run_replay(config: &SessionConfig, path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let controller = start_session(ChessModel::new(), build_views(config)?);
    run_console(&controller, BufReader::new(file), &mut io::stdout())?;

    println!(
        "{}",
        format_record(&controller.history(), controller.current_status())
    );
    Ok(())
}
