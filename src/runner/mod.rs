//! Runner module.
//!
//! Executes the chosen command and reports how it ended.

mod executor;
mod signals;

pub use executor::{
    format_dry_run_command, format_running_notice, ExecutionResult, Executor, ProcessExecutor,
};
pub use signals::ForwardingGuard;
