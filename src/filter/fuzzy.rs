//! Fuzzy matching implementation.
//!
//! Uses SkimMatcherV2 for high-performance fuzzy matching with scoring.
//! A query is split on whitespace and every term must match, the way fzf
//! treats `deploy prod`.

use std::sync::OnceLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as FuzzyMatcherTrait;

use crate::registry::CommandDescriptor;

static IGNORE_CASE_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();
static RESPECT_CASE_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();

fn global_matcher(case_sensitive: bool) -> &'static SkimMatcherV2 {
    if case_sensitive {
        RESPECT_CASE_MATCHER.get_or_init(|| SkimMatcherV2::default().respect_case())
    } else {
        IGNORE_CASE_MATCHER.get_or_init(|| SkimMatcherV2::default().ignore_case())
    }
}

/// How a query is matched against commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Also match against summaries (at half the score of a name match).
    pub search_summaries: bool,
    /// Match case exactly.
    pub case_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            search_summaries: true,
            case_sensitive: false,
        }
    }
}

/// Fuzzy matcher for command filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    options: MatchOptions,
}

impl FuzzyMatcher {
    /// Create a matcher from options.
    pub fn with_options(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Match a command against a query.
    ///
    /// Returns a score if every query term matches the name (or the summary),
    /// or None if it doesn't.
    pub fn match_command(&self, command: &CommandDescriptor, query: &str) -> Option<i64> {
        let matcher = global_matcher(self.options.case_sensitive);
        let mut total = 0;

        for term in query.split_whitespace() {
            if let Some(score) = matcher.fuzzy_match(command.name(), term) {
                total += score;
                continue;
            }

            let summary = command.summary().filter(|_| self.options.search_summaries)?;
            // Summary matches rank below name matches
            total += matcher.fuzzy_match(summary, term)? / 2;
        }

        Some(total)
    }
}

/// Filter commands based on a query.
///
/// Returns (index, score) pairs sorted by score descending (best matches
/// first). Equal scores keep their snapshot order.
///
/// # Arguments
///
/// * `query` - The search query (a blank query returns all commands with score 0)
/// * `commands` - Slice of commands to filter
/// * `options` - Case sensitivity and summary search
///
/// # Examples
///
/// ```
/// use toolbox::filter::{filter_commands, MatchOptions};
/// use toolbox::registry::{CommandDescriptor, Target};
///
/// let commands = vec![
///     CommandDescriptor::new("update", Target::program("/opt/tools/update")),
///     CommandDescriptor::new("deploy", Target::program("/opt/tools/deploy")),
///     CommandDescriptor::new("clean", Target::program("/opt/tools/clean")),
/// ];
///
/// let results = filter_commands("dep", &commands, MatchOptions::default());
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].0, 1); // "deploy" is at index 1
/// ```
pub fn filter_commands(
    query: &str,
    commands: &[CommandDescriptor],
    options: MatchOptions,
) -> Vec<(usize, i64)> {
    if query.trim().is_empty() {
        return (0..commands.len()).map(|i| (i, 0)).collect();
    }

    let matcher = FuzzyMatcher::with_options(options);
    let mut matches: Vec<(usize, i64)> = commands
        .iter()
        .enumerate()
        .filter_map(|(idx, command)| matcher.match_command(command, query).map(|s| (idx, s)))
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches
}

/// Get the character indices of `text` matched by the query terms.
///
/// This is useful for highlighting matched portions of text in the UI.
///
/// # Examples
///
/// ```
/// use toolbox::filter::get_match_indices;
///
/// let indices = get_match_indices("dy", "deploy", false);
/// assert_eq!(indices, vec![0, 5]); // 'd' at 0, 'y' at 5
/// ```
pub fn get_match_indices(query: &str, text: &str, case_sensitive: bool) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }

    let matcher = global_matcher(case_sensitive);
    let mut indices: Vec<usize> = query
        .split_whitespace()
        .filter_map(|term| matcher.fuzzy_indices(text, term))
        .flat_map(|(_, indices)| indices)
        .collect();

    indices.sort_unstable();
    indices.dedup();
    indices
}
