//! Selector module.
//!
//! Interactive choosers over a snapshot: `fzf` when available, otherwise the
//! built-in picker.

mod builtin;
mod fzf;

use std::path::PathBuf;

use log::debug;

use crate::config::{AppearanceConfig, SelectorBackend};
use crate::error::Result;
use crate::filter::{filter_commands, MatchOptions};
use crate::registry::CommandDescriptor;

pub use builtin::BuiltinSelector;
pub use fzf::{candidate_lines, parse_selection, FzfSelector};

/// An interactive chooser.
pub trait Selector {
    /// Short backend name for logs and errors.
    fn name(&self) -> &'static str;

    /// Let the user pick one of `commands`, starting from `prefilter`.
    ///
    /// Returns the index of the chosen command, or `None` if the user
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns `NoTerminal` when stdin is not a terminal, and
    /// `SelectorFailed` when the backend itself breaks.
    fn select(
        &mut self,
        commands: &[CommandDescriptor],
        prefilter: Option<&str>,
    ) -> Result<Option<usize>>;
}

/// A backend with `Auto` decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBackend {
    /// fzf at this path.
    Fzf(PathBuf),
    /// The built-in picker.
    Builtin,
}

/// Decide which backend to use.
///
/// `Auto` picks fzf when it is on `PATH`. An explicit `Fzf` that cannot be
/// found is still attempted by name, so the spawn error gets reported.
pub fn resolve_backend(backend: SelectorBackend) -> ResolvedBackend {
    let found = || which::which("fzf").ok();
    match backend {
        SelectorBackend::Builtin => ResolvedBackend::Builtin,
        SelectorBackend::Fzf => ResolvedBackend::Fzf(found().unwrap_or_else(|| PathBuf::from("fzf"))),
        SelectorBackend::Auto => match found() {
            Some(path) => ResolvedBackend::Fzf(path),
            None => ResolvedBackend::Builtin,
        },
    }
}

/// Everything a selector needs besides the commands.
#[derive(Debug, Clone, Default)]
pub struct SelectorSettings {
    /// Palette name, used as title and prompt.
    pub title: String,
    /// Match options.
    pub options: MatchOptions,
    /// Picker appearance.
    pub appearance: AppearanceConfig,
}

/// Build the selector for `backend`.
pub fn build_selector(backend: ResolvedBackend, settings: &SelectorSettings) -> Box<dyn Selector> {
    debug!("Using selector backend {backend:?}");
    match backend {
        ResolvedBackend::Fzf(program) => Box::new(
            FzfSelector::new(program)
                .prompt(format!("{}> ", settings.title))
                .case_sensitive(settings.options.case_sensitive),
        ),
        ResolvedBackend::Builtin => Box::new(
            BuiltinSelector::new(settings.title.clone())
                .options(settings.options)
                .appearance(settings.appearance.clone()),
        ),
    }
}

/// The only command matching a non-blank `prefilter`, if exactly one does.
pub fn select_one(
    commands: &[CommandDescriptor],
    prefilter: Option<&str>,
    options: MatchOptions,
) -> Option<usize> {
    let query = prefilter.filter(|q| !q.trim().is_empty())?;
    match filter_commands(query, commands, options).as_slice() {
        [(idx, _)] => Some(*idx),
        _ => None,
    }
}
