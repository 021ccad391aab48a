//! Integration tests for toolbox.
//!
//! Organized by feature:
//!
//! - `fixtures` - Helpers for scripts directories, config files and binaries
//! - `cli_tests` - Command-line behaviour of both palettes
//! - `config_tests` - Configuration loading and merging
//! - `snapshot_tests` - Listing output snapshots using insta

pub mod cli_tests;
pub mod config_tests;
pub mod fixtures;
pub mod snapshot_tests;
