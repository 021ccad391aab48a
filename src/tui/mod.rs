//! TUI module.
//!
//! The built-in interactive picker.

mod app;
mod input;
mod layout;
mod theme;
mod ui;
pub mod widgets;

pub use app::{App, AppMode};
pub use input::handle_event;
pub use layout::{centered_rect_fixed, PickerLayout};
pub use theme::Theme;
pub use ui::{render, run_picker, TerminalGuard};
