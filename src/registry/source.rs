//! Command sources and the discovery pass that turns them into a snapshot.

use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use log::debug;

use super::summaries::resolve_summary;
use super::types::{CommandDescriptor, Snapshot, Target};
use crate::error::{LauncherError, Result};

/// Options for scanning a scripts directory.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extension (without the dot) to interpreter command line.
    pub interpreters: HashMap<String, String>,
    /// Summaries keyed by command name, taking priority over file contents.
    pub summaries: HashMap<String, String>,
    /// Read the head of each file to find a summary.
    pub read_summaries: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            interpreters: HashMap::new(),
            summaries: HashMap::new(),
            read_summaries: true,
        }
    }
}

/// Where a palette's commands come from.
#[derive(Debug, Clone)]
pub enum CommandSource {
    /// Every runnable, non-hidden file directly inside `path`.
    DirectoryScan { path: PathBuf, options: ScanOptions },
    /// Explicitly declared commands, kept in declaration order.
    StaticList { definitions: Vec<CommandDescriptor> },
}

impl CommandSource {
    /// Scan `path` with default options.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        CommandSource::DirectoryScan {
            path: path.into(),
            options: ScanOptions::default(),
        }
    }

    /// Run discovery for this source.
    pub fn discover(&self) -> Result<Snapshot> {
        discover(self)
    }
}

/// Build a snapshot from a source.
///
/// # Errors
///
/// Returns `SourceUnavailable` if a scanned directory is missing, is not a
/// directory, or cannot be listed. An existing empty directory is not an
/// error.
pub fn discover(source: &CommandSource) -> Result<Snapshot> {
    match source {
        CommandSource::DirectoryScan { path, options } => scan_directory(path, options),
        CommandSource::StaticList { definitions } => {
            Ok(Snapshot::from_descriptors(definitions.iter().cloned()))
        }
    }
}

fn scan_directory(dir: &Path, options: &ScanOptions) -> Result<Snapshot> {
    let meta = fs::metadata(dir).map_err(|e| LauncherError::source_unavailable(dir, &e))?;
    if !meta.is_dir() {
        return Err(LauncherError::SourceUnavailable {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| LauncherError::source_unavailable(dir, &e))?;

    let mut found: Vec<(String, CommandDescriptor)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };

        let path = entry.path();
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Skipping non-UTF-8 file name {}", path.display());
            continue;
        };
        if is_hidden(&file_name) {
            continue;
        }

        // Follows symlinks, so a link to a script counts as the script
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }

        let Some(target) = runnable_target(&path, &meta, &options.interpreters) else {
            debug!("Skipping {}: not executable", path.display());
            continue;
        };

        let name = command_name(&path);
        let mut descriptor = CommandDescriptor::new(name.clone(), target);
        if let Some(summary) =
            resolve_summary(&name, &path, &options.summaries, options.read_summaries)
        {
            descriptor.set_summary(summary);
        }

        found.push((file_name, descriptor));
    }

    // Deterministic winner when two files share a stem
    found.sort_by(|a, b| a.0.cmp(&b.0));

    let mut snapshot = Snapshot::from_descriptors(found.into_iter().map(|(_, d)| d));
    snapshot.sort_by_name();

    debug!("Found {} commands in {}", snapshot.len(), dir.display());
    Ok(snapshot)
}

/// Names starting with `.` or `_` are private helpers, not commands.
fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.') || file_name.starts_with('_')
}

fn command_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn runnable_target(
    path: &Path,
    meta: &Metadata,
    interpreters: &HashMap<String, String>,
) -> Option<Target> {
    let interpreter = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| interpreters.get(ext));

    if let Some(interpreter) = interpreter {
        return Some(interpreted_target(interpreter, path));
    }

    if is_executable(path, meta) {
        Some(Target::program(path))
    } else {
        None
    }
}

/// `python3` or `uv run --script` style interpreter command lines.
fn interpreted_target(interpreter: &str, path: &Path) -> Target {
    let mut words = shell_words::split(interpreter)
        .ok()
        .filter(|words| !words.is_empty())
        .unwrap_or_else(|| vec![interpreter.to_string()]);

    let program = words.remove(0);
    words.push(path.display().to_string());
    Target::program_with_args(program, words)
}

#[cfg(unix)]
fn is_executable(_path: &Path, meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(path: &Path, _meta: &Metadata) -> bool {
    const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com"];
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXECUTABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
