//! Widgets for the picker.

mod commands;
mod filter;
mod footer;
mod header;

pub use commands::{CommandList, EmptyCommands};
pub use filter::Filter;
pub use footer::Footer;
pub use header::{truncate_with_ellipsis, Header};
