//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Front ends that can be attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Human-readable text on stdout.
    Console,
    /// JSON Lines event log.
    Json,
}

/// Configuration for a console game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Greeting printed at the start of every game.
    #[serde(default = "default_welcome_text")]
    welcome_text: String,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Views registered at startup, in order.
    #[serde(default = "default_views")]
    views: Vec<ViewKind>,

    /// Destination of the JSON view.
    #[serde(default = "default_json_log_path")]
    json_log_path: PathBuf,

    /// Print the board after every move.
    #[serde(default)]
    show_board: bool,
}

#[instrument]
fn default_welcome_text() -> String {
    "Welcome to another wonderful chess game! Type 'help' for commands.".to_string()
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

#[instrument]
fn default_views() -> Vec<ViewKind> {
    vec![ViewKind::Console]
}

#[instrument]
fn default_json_log_path() -> PathBuf {
    PathBuf::from("chess_control.jsonl")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_text: default_welcome_text(),
            log_filter: default_log_filter(),
            views: default_views(),
            json_log_path: default_json_log_path(),
            show_board: false,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(views = ?config.views, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the view list (e.g. from command-line flags).
    pub fn with_views(mut self, views: Vec<ViewKind>) -> Self {
        self.views = views;
        self
    }

    /// Overrides the JSON log destination.
    pub fn with_json_log_path(mut self, path: PathBuf) -> Self {
        self.json_log_path = path;
        self
    }

    /// Overrides board printing.
    pub fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SessionConfig::from_toml("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.views(), &vec![ViewKind::Console]);
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml(
            r#"
views = ["console", "json"]
show_board = true
"#,
        )
        .unwrap();
        assert_eq!(config.views(), &vec![ViewKind::Console, ViewKind::Json]);
        assert!(*config.show_board());
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_bad_toml_reports_location() {
        let err = SessionConfig::from_toml("views = [\"hologram\"]").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }
}
