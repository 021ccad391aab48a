//! Command registry.
//!
//! Discovers runnable commands from a [`CommandSource`] and normalizes them
//! into a [`Snapshot`] of [`CommandDescriptor`]s.

mod source;
mod summaries;
mod types;

pub use source::{discover, CommandSource, ScanOptions};
pub use summaries::{
    extract_summary, read_summary, resolve_summary, MAX_SUMMARY_BYTES, MAX_SUMMARY_LINES,
};
pub use types::{BuiltinHandler, CommandDescriptor, Snapshot, Target};
