//! Path utilities.

use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

/// Maximum number of parent directories to search.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// Directory name looked for when no scripts directory is configured.
pub const SCRIPTS_DIR_NAME: &str = "scripts";

/// Find the nearest `scripts/` directory starting from the given directory.
///
/// Searches the given directory and up to 10 parent directories.
///
/// # Errors
///
/// Returns `SourceUnavailable` if `start_dir` cannot be resolved, and
/// `NoScriptsDir` if no `scripts/` directory is found.
pub fn find_scripts_dir(start_dir: &Path) -> Result<PathBuf> {
    let start = start_dir
        .canonicalize()
        .map_err(|e| LauncherError::source_unavailable(start_dir, &e))?;

    let mut current = start.as_path();
    let mut depth = 0;

    while depth < MAX_SEARCH_DEPTH {
        let candidate = current.join(SCRIPTS_DIR_NAME);
        if candidate.is_dir() {
            return Ok(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
                depth += 1;
            }
            _ => break,
        }
    }

    Err(LauncherError::NoScriptsDir {
        start,
        depth: MAX_SEARCH_DEPTH,
    })
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Get the config directory for toolbox.
///
/// Returns `~/.config/toolbox` on Unix-like systems.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("toolbox"))
}

/// Get the global config file path.
///
/// Returns `~/.config/toolbox/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
