//! toolbox - fuzzy pick-and-run launchers
//!
//! Two palettes share one library:
//!
//! - `scripts` scans a scripts directory and offers every executable file in it.
//! - `flow` offers a fixed list of built-in subcommands plus any commands
//!   declared in the config file.
//!
//! Either one runs a command directly when its name is given, lists the
//! commands with `--list`, and otherwise opens a fuzzy selector (`fzf` when
//! installed, the built-in picker when not). Arguments after `--` reach the
//! chosen command unchanged, and the launcher exits with its status.
//!
//! # Modules
//!
//! - [`registry`] - Command descriptors and discovery
//! - [`cli`] - Command-line parsing and the `--` split
//! - [`config`] - Configuration file loading and types
//! - [`selector`] - fzf and built-in selection
//! - [`runner`] - Command execution and exit-status propagation
//! - [`launcher`] - The flow shared by both binaries
//!
//! # Example
//!
//! ```no_run
//! use toolbox::registry::{discover, CommandSource};
//!
//! let snapshot = discover(&CommandSource::directory("./scripts")).expect("scan failed");
//! for command in &snapshot {
//!     println!("{}", command.name());
//! }
//! ```

/// Built-in `flow` subcommands.
pub mod builtins;

/// CLI argument definitions.
pub mod cli;

/// Configuration system for loading and merging settings.
pub mod config;

/// Error types and exit codes.
pub mod error;

/// Fuzzy filtering for commands.
pub mod filter;

/// Listing, selection and launch.
pub mod launcher;

/// Command descriptors and discovery.
pub mod registry;

/// Command execution.
pub mod runner;

/// Interactive selectors.
pub mod selector;

/// Built-in picker.
pub mod tui;

/// Path utilities.
pub mod utils;

// Re-export commonly used types
pub use cli::{Cli, Palette};
pub use config::Config;
pub use error::{LauncherError, Result};
pub use registry::{CommandDescriptor, CommandSource, Snapshot, Target};
