//! Command execution.
//!
//! Runs the chosen command as a child process with inherited stdio (or
//! in-process for builtins), and reports how it ended.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use super::signals::ForwardingGuard;
use crate::error::{exit_code, LauncherError, Result};
use crate::registry::{BuiltinHandler, CommandDescriptor, Target};

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Code the launcher should exit with.
    pub exit_code: i32,
    /// The command was terminated by a signal.
    pub signaled: bool,
    /// The terminating signal, when `signaled`.
    pub signal: Option<i32>,
}

impl ExecutionResult {
    /// A normal exit with `code`.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: code,
            signaled: false,
            signal: None,
        }
    }

    /// Termination by `signal`, reported as `128 + signal`.
    pub fn killed_by(signal: i32) -> Self {
        Self {
            exit_code: exit_code::SIGNAL_BASE + signal,
            signaled: true,
            signal: Some(signal),
        }
    }

    /// Translate a child's exit status.
    pub fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::killed_by(signal);
            }
        }

        Self::exited(status.code().unwrap_or(exit_code::GENERAL_ERROR))
    }
}

/// Runs a chosen command with forwarded arguments.
pub trait Executor {
    /// Run `command` with `args` appended to its target.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailure` if the target cannot be started.
    fn run(&mut self, command: &CommandDescriptor, args: &[String]) -> Result<ExecutionResult>;
}

/// Executor that spawns real processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    dry_run: bool,
    echo: bool,
}

impl ProcessExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the command instead of running it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Echo the command to stderr before running it.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Executor for ProcessExecutor {
    fn run(&mut self, command: &CommandDescriptor, args: &[String]) -> Result<ExecutionResult> {
        let line = command.command_line(args);

        if self.dry_run {
            println!("{}", format_dry_run_command(&line));
            return Ok(ExecutionResult::exited(exit_code::SUCCESS));
        }

        if self.echo {
            eprintln!("{}", format_running_notice(&line));
        }

        match command.target() {
            Target::Builtin(handler) => Ok(run_builtin(command.name(), *handler, args)),
            Target::Program {
                program,
                args: fixed,
            } => spawn_program(program, fixed, args),
        }
    }
}

/// Call an in-process handler; its return value is the exit code.
fn run_builtin(name: &str, handler: BuiltinHandler, args: &[String]) -> ExecutionResult {
    debug!("Running builtin '{name}' with {args:?}");
    match handler(args) {
        Ok(code) => ExecutionResult::exited(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExecutionResult::exited(exit_code::GENERAL_ERROR)
        }
    }
}

fn spawn_program(program: &Path, fixed: &[String], extra: &[String]) -> Result<ExecutionResult> {
    debug!("Spawning {} {:?} {:?}", program.display(), fixed, extra);

    let mut command = Command::new(program);
    command.args(fixed).args(extra);

    // Inherit stdio for interactive commands
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    // Blocked across the spawn; the child starts with default dispositions
    let mut guard = ForwardingGuard::block();

    let mut child = command.spawn().map_err(|source| LauncherError::LaunchFailure {
        target: program.display().to_string(),
        source,
    })?;

    match guard.as_mut() {
        Ok(guard) => {
            if let Err(e) = guard.forward_to(child.id()) {
                debug!("Signal forwarding unavailable: {e}");
            }
        }
        Err(e) => debug!("Signal forwarding unavailable: {e}"),
    }

    let status = child.wait().map_err(LauncherError::Io);
    drop(guard);

    let result = ExecutionResult::from_status(status?);
    debug!("{} finished: {result:?}", program.display());
    Ok(result)
}

/// Format a command for display in dry-run mode.
pub fn format_dry_run_command(line: &[String]) -> String {
    format!("Would run: {}", shell_words::join(line))
}

/// Notice printed before running a command.
pub fn format_running_notice(line: &[String]) -> String {
    format!("→ Running {}", shell_words::join(line))
}
