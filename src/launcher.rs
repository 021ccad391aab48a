//! The launcher flow shared by both binaries.
//!
//! Parse the command line, discover the palette's commands, then either
//! list them or pick one (directly by name, by a unique prefilter match, or
//! through the selector) and run it. The process exits with the command's
//! own status.

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, LevelFilter};

use crate::builtins::flow_builtins;
use crate::cli::{Cli, InvocationRequest, Palette};
use crate::config::{generate_example_config, load_config, Config};
use crate::error::{exit_code, LauncherError};
use crate::filter::MatchOptions;
use crate::registry::{discover, CommandDescriptor, CommandSource, ScanOptions, Snapshot};
use crate::runner::{Executor, ProcessExecutor};
use crate::selector::{build_selector, resolve_backend, select_one, Selector, SelectorSettings};
use crate::utils::{expand_path, find_scripts_dir};

/// Widest name column in listings; longer names push their summary right.
const LIST_NAME_WIDTH: usize = 30;

/// Entry point for a palette binary.
pub fn main(palette: Palette) -> ExitCode {
    let (cli, request) = Cli::parse_invocation(palette);
    init_logging(cli.debug);
    debug!("{cli:?}");
    debug!("{request:?}");

    let code = match run(palette, &cli, &request) {
        Ok(code) => code,
        Err(err) => report(&err),
    };
    ExitCode::from(u8::try_from(code).unwrap_or(exit_code::GENERAL_ERROR as u8))
}

/// Set up `log` output on stderr.
///
/// Warnings by default, everything from this crate with `--debug`.
/// `RUST_LOG` overrides both.
pub fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

/// Print an error and pick the exit code for it.
pub fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LauncherError>() {
        // A cancelled picker is an answer, not a failure
        Some(cancelled @ LauncherError::SelectionCancelled) => {
            eprintln!("{cancelled}");
            cancelled.exit_code()
        }
        Some(launcher_err) => {
            eprintln!("Error: {launcher_err}");
            launcher_err.exit_code()
        }
        None => {
            eprintln!("Error: {err:#}");
            exit_code::GENERAL_ERROR
        }
    }
}

/// Run one invocation and return the process exit code.
pub fn run(palette: Palette, cli: &Cli, request: &InvocationRequest) -> Result<i32> {
    if let Some(shell) = cli.completions {
        Cli::generate_completions(palette, shell, &mut io::stdout());
        return Ok(exit_code::SUCCESS);
    }
    if cli.print_config {
        print!("{}", generate_example_config());
        return Ok(exit_code::SUCCESS);
    }

    let config = load_config(cli.config.as_deref(), cli.no_config)?;
    let source = build_source(palette, cli, &config)?;
    let snapshot = discover(&source)?;

    let mut exclude = config.exclude.patterns.clone();
    exclude.extend(cli.exclude.iter().cloned());
    let snapshot = snapshot.without_matching(&exclude);
    debug!("{} {}(s) after exclusions", snapshot.len(), palette.noun());

    if request.list_only {
        let mut stdout = io::stdout().lock();
        if cli.json {
            list_json(&snapshot, &mut stdout)?;
        } else {
            list_commands(&snapshot, &mut stdout, io::stdout().is_terminal())?;
        }
        return Ok(exit_code::SUCCESS);
    }

    let policy = SelectionPolicy::new(cli, &config);
    let backend = resolve_backend(cli.backend_override().unwrap_or(config.selector.backend));
    let settings = SelectorSettings {
        title: palette.name().to_string(),
        options: policy.options,
        appearance: config.appearance.clone(),
    };
    let mut selector = build_selector(backend, &settings);
    let mut executor = ProcessExecutor::new()
        .dry_run(cli.dry_run)
        .echo(io::stderr().is_terminal());

    launch(request, &snapshot, &policy, selector.as_mut(), &mut executor)
}

/// How a command is picked when the request does not name one exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Run the only prefilter match without asking.
    pub select_one: bool,
    pub options: MatchOptions,
}

impl SelectionPolicy {
    /// Command-line flags over config values.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            select_one: cli
                .select_one_override()
                .unwrap_or(config.selector.select_one),
            options: MatchOptions {
                search_summaries: config.selector.search_summaries,
                case_sensitive: config.selector.case_sensitive,
            },
        }
    }
}

/// Pick a command from `snapshot` and run it, returning its exit code.
///
/// # Errors
///
/// `SelectionCancelled` when the selector is dismissed, in which case
/// nothing runs. Selector and launch failures are passed through.
pub fn launch(
    request: &InvocationRequest,
    snapshot: &Snapshot,
    policy: &SelectionPolicy,
    selector: &mut dyn Selector,
    executor: &mut dyn Executor,
) -> Result<i32> {
    let (command, args) =
        choose(request, snapshot, policy, selector)?.ok_or(LauncherError::SelectionCancelled)?;
    let result = executor.run(command, &args)?;
    Ok(result.exit_code)
}

/// Decide which command runs and with which arguments.
///
/// `None` means the user cancelled the selector.
fn choose<'s>(
    request: &InvocationRequest,
    snapshot: &'s Snapshot,
    policy: &SelectionPolicy,
    selector: &mut dyn Selector,
) -> Result<Option<(&'s CommandDescriptor, Vec<String>)>> {
    if let Some(command) = request
        .explicit_name
        .as_deref()
        .and_then(|name| snapshot.get(name))
    {
        debug!("Exact match for '{}'", command.name());
        return Ok(Some((command, request.explicit_args())));
    }

    let commands = snapshot.as_slice();
    let prefilter = request.prefilter.as_deref();

    if policy.select_one {
        if let Some(idx) = select_one(commands, prefilter, policy.options) {
            debug!("Only match for {prefilter:?}: '{}'", commands[idx].name());
            return Ok(Some((&commands[idx], request.passthrough_args.clone())));
        }
    }

    debug!("Opening the {} selector", selector.name());
    let chosen = selector.select(commands, prefilter)?;
    Ok(chosen.map(|idx| (&commands[idx], request.passthrough_args.clone())))
}

/// Where this palette's commands come from.
fn build_source(palette: Palette, cli: &Cli, config: &Config) -> Result<CommandSource> {
    match palette {
        Palette::Scripts => {
            let path = scripts_dir(cli, config)?;
            debug!("Scanning {}", path.display());
            Ok(CommandSource::DirectoryScan {
                path,
                options: ScanOptions {
                    interpreters: config.scripts.interpreters.clone(),
                    summaries: config.scripts.summaries.clone(),
                    read_summaries: config.scripts.read_summaries,
                },
            })
        }
        Palette::Flow => {
            let mut definitions = flow_builtins();
            definitions.extend(config.commands.iter().map(|c| c.to_descriptor()));
            Ok(CommandSource::StaticList { definitions })
        }
    }
}

/// `--dir`, then `scripts.dir`, then the nearest `scripts/` above the
/// working directory.
fn scripts_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(expand_path(dir));
    }
    if let Some(dir) = config.scripts_dir() {
        return Ok(dir);
    }

    let cwd = env::current_dir().context("Failed to read the current directory")?;
    Ok(find_scripts_dir(&cwd)?)
}

/// Print one command per line: the name, then its summary in a padded
/// column. Summaries are dimmed when `color` is set.
pub fn list_commands(snapshot: &Snapshot, out: &mut impl Write, color: bool) -> io::Result<()> {
    let width = snapshot
        .iter()
        .filter(|c| c.summary().is_some())
        .map(|c| c.name().chars().count())
        .max()
        .unwrap_or(0)
        .min(LIST_NAME_WIDTH);

    for command in snapshot {
        match command.summary() {
            Some(summary) if color => {
                writeln!(out, "{:width$}  \x1b[2m{summary}\x1b[0m", command.name())?
            }
            Some(summary) => writeln!(out, "{:width$}  {summary}", command.name())?,
            None => writeln!(out, "{}", command.name())?,
        }
    }
    out.flush()
}

/// Print the snapshot as a JSON array.
pub fn list_json(snapshot: &Snapshot, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, snapshot).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
