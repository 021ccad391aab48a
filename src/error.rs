//! Custom error types for the launcher.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the launcher binaries.
///
/// These values are part of the command-line contract and must stay stable:
/// scripts wrapping `scripts` or `flow` branch on them. Any other non-zero
/// code comes from the launched target itself.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// Invalid command-line usage (reported by clap).
    pub const USAGE: i32 = 2;
    /// The command source (scripts directory) is missing or unreadable.
    pub const SOURCE_UNAVAILABLE: i32 = 66;
    /// An explicitly requested config file is unreadable or invalid.
    pub const INVALID_CONFIG: i32 = 78;
    /// The user dismissed the selector without choosing a command.
    pub const SELECTION_CANCELLED: i32 = 125;
    /// The chosen target could not be started.
    pub const LAUNCH_FAILURE: i32 = 126;
    /// Base added to a signal number when the target was killed by it.
    pub const SIGNAL_BASE: i32 = 128;
}

/// Main error type for the launcher.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The configured source location is missing, not a directory, or unreadable.
    #[error("Command source {path} is unavailable: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// No scripts directory was given and none was found above the working directory.
    #[error("No scripts/ directory found in {start} or any parent directory (searched up to {depth} levels)\n\nTip: Pass --dir <PATH> or set `dir` under [scripts] in your config.")]
    NoScriptsDir { start: PathBuf, depth: usize },

    /// The chosen target could not be spawned.
    #[error("Failed to launch '{target}': {source}")]
    LaunchFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The user cancelled the selector.
    #[error("No command selected.")]
    SelectionCancelled,

    /// Interactive selection needs a terminal.
    #[error("Interactive selection needs a terminal\n\nTip: Use --list to see the commands, or pass a command name to run it directly.")]
    NoTerminal,

    /// The external selector exited abnormally.
    #[error("Selector '{selector}' failed: {message}")]
    SelectorFailed { selector: String, message: String },

    /// Invalid configuration file.
    #[error("Invalid config at {path}:\n  {message}\n\nTip: Check the config file syntax and ensure all values are valid.")]
    InvalidConfig { path: PathBuf, message: String },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::SourceUnavailable { .. } => exit_code::SOURCE_UNAVAILABLE,
            LauncherError::NoScriptsDir { .. } => exit_code::SOURCE_UNAVAILABLE,
            LauncherError::LaunchFailure { .. } => exit_code::LAUNCH_FAILURE,
            LauncherError::SelectionCancelled => exit_code::SELECTION_CANCELLED,
            LauncherError::NoTerminal => exit_code::GENERAL_ERROR,
            LauncherError::SelectorFailed { .. } => exit_code::GENERAL_ERROR,
            LauncherError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
            LauncherError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Build a `SourceUnavailable` from an IO error on `path`.
    pub fn source_unavailable(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        LauncherError::SourceUnavailable {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
