//! Filter module.
//!
//! Provides fuzzy matching and filtering for command names and summaries.

mod fuzzy;

pub use fuzzy::{filter_commands, get_match_indices, FuzzyMatcher, MatchOptions};
