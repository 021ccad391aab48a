//! CLI argument definitions shared by the `scripts` and `flow` binaries.
//!
//! Uses clap with derive macros for the launcher's own options. The raw
//! command line is first split into three zones:
//!
//! ```text
//! scripts [OPTIONS] [QUERY]... [-- ARGS...]
//! ```
//!
//! Everything after the first `--` is forwarded to the chosen command
//! untouched. Before it, tokens that name a launcher option go to clap and
//! everything else (including unknown `--flags`) is query text.
//!
//! # Example
//!
//! ```
//! use toolbox::cli::{Cli, Palette};
//!
//! let args = ["scripts", "update", "--", "--flag", "value"].map(String::from);
//! let (cli, request) = Cli::try_parse_invocation(Palette::Scripts, args).unwrap();
//!
//! assert!(!cli.list);
//! assert_eq!(request.explicit_name.as_deref(), Some("update"));
//! assert_eq!(request.passthrough_args, vec!["--flag", "value"]);
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Command, CommandFactory, FromArgMatches, Parser, ValueEnum};
use clap_complete::{generate, Shell};

use crate::config::SelectorBackend;

/// Token separating launcher arguments from forwarded ones.
pub const SEPARATOR: &str = "--";

/// Which flavour of the launcher is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Picker over the files of a scripts directory.
    Scripts,
    /// Palette of built-in and configured subcommands.
    Flow,
}

impl Palette {
    /// Binary name.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Scripts => "scripts",
            Palette::Flow => "flow",
        }
    }

    /// One-line description for `--help`.
    pub fn about(self) -> &'static str {
        match self {
            Palette::Scripts => "Fuzzy-pick a script from your scripts directory and run it",
            Palette::Flow => "Fuzzy-pick one of your flow commands and run it",
        }
    }

    /// What one entry is called in messages.
    pub fn noun(self) -> &'static str {
        match self {
            Palette::Scripts => "script",
            Palette::Flow => "command",
        }
    }
}

/// Fuzzy-pick a command and run it.
#[derive(Parser, Debug)]
#[command(name = "scripts")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Arguments after `--` are passed to the chosen command unchanged.")]
pub struct Cli {
    /// Command to run, or search text for the picker
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// List commands non-interactively
    #[arg(short, long)]
    pub list: bool,

    /// Print the list as JSON (with --list)
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Directory to scan for scripts
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Exclude commands matching pattern (can be repeated)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Run the only match of QUERY without opening the picker (default)
    #[arg(short = '1', long = "select-1", overrides_with = "no_select_one")]
    pub select_one: bool,

    /// Always open the picker, even for a single match
    #[arg(long = "no-select-1")]
    pub no_select_one: bool,

    /// Picker backend
    #[arg(short, long, value_name = "BACKEND", value_enum)]
    pub backend: Option<CliBackend>,

    /// Show command without executing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,

    /// Print an example config file
    #[arg(long)]
    pub print_config: bool,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Picker backend for CLI parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliBackend {
    /// fzf if installed, otherwise the built-in picker
    Auto,
    /// fzf
    Fzf,
    /// Built-in picker
    Builtin,
}

impl From<CliBackend> for SelectorBackend {
    fn from(backend: CliBackend) -> Self {
        match backend {
            CliBackend::Auto => SelectorBackend::Auto,
            CliBackend::Fzf => SelectorBackend::Fzf,
            CliBackend::Builtin => SelectorBackend::Builtin,
        }
    }
}

/// The parsed command line, as seen by the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    /// First non-flag query token; runs directly if it names a command.
    pub explicit_name: Option<String>,
    /// All query tokens joined by single spaces.
    pub prefilter: Option<String>,
    /// Tokens after the first `--`, verbatim and in order.
    pub passthrough_args: Vec<String>,
    /// `--list` was given.
    pub list_only: bool,
    /// Query tokens other than `explicit_name`, in order.
    pub other_operands: Vec<String>,
}

impl InvocationRequest {
    /// Build a request from the query tokens and the forwarded tokens.
    pub fn new(list_only: bool, operands: Vec<String>, passthrough_args: Vec<String>) -> Self {
        if list_only {
            return Self {
                list_only,
                passthrough_args,
                ..Self::default()
            };
        }

        let prefilter = (!operands.is_empty()).then(|| operands.join(" "));
        let explicit_at = operands.iter().position(|t| !t.starts_with('-'));

        let mut other_operands = operands;
        let explicit_name = explicit_at.map(|i| other_operands.remove(i));

        Self {
            explicit_name,
            prefilter,
            passthrough_args,
            list_only,
            other_operands,
        }
    }

    /// Arguments for a command chosen by `explicit_name`.
    ///
    /// Leftover query tokens go first, so `flow hello Alice` behaves like
    /// `flow hello -- Alice`.
    pub fn explicit_args(&self) -> Vec<String> {
        self.other_operands
            .iter()
            .chain(&self.passthrough_args)
            .cloned()
            .collect()
    }
}

/// Raw tokens sorted into zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Launcher options, with their values.
    pub options: Vec<String>,
    /// Everything else before the separator.
    pub operands: Vec<String>,
    /// Everything after the separator.
    pub passthrough: Vec<String>,
}

/// Known option spellings of a clap command.
struct OptionTable {
    /// Long name to "takes a value".
    longs: HashMap<String, bool>,
    /// Short flag to "takes a value".
    shorts: HashMap<char, bool>,
}

impl OptionTable {
    fn from_command(cmd: &Command) -> Self {
        let mut longs = HashMap::new();
        let mut shorts = HashMap::new();

        for arg in cmd.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                longs.insert(long.to_string(), takes_value);
            }
            if let Some(short) = arg.get_short() {
                shorts.insert(short, takes_value);
            }
        }

        Self { longs, shorts }
    }

    /// `Some(needs_next_token)` if `--name[=value]` is a known option.
    fn long(&self, body: &str) -> Option<bool> {
        let (name, inline) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        self.longs.get(name).map(|takes| *takes && !inline)
    }

    /// `Some(needs_next_token)` if every flag in a `-abc` cluster is known.
    fn short_cluster(&self, cluster: &str) -> Option<bool> {
        for (i, c) in cluster.char_indices() {
            match self.shorts.get(&c)? {
                // The rest of the cluster is the value, if any
                true => return Some(i + c.len_utf8() == cluster.len()),
                false => continue,
            }
        }
        Some(false)
    }
}

/// Sort raw tokens (without the binary name) into zones.
///
/// Total: every token lands in exactly one zone. Option tokens that need a
/// value take the following token with them.
pub fn split_args(raw: &[String], cmd: &Command) -> SplitArgs {
    let table = OptionTable::from_command(cmd);
    let mut split = SplitArgs::default();
    let mut tokens = raw.iter();

    while let Some(token) = tokens.next() {
        if token == SEPARATOR {
            split.passthrough = tokens.cloned().collect();
            break;
        }

        let known = if let Some(body) = token.strip_prefix("--") {
            table.long(body)
        } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            table.short_cluster(cluster)
        } else {
            None
        };

        match known {
            Some(needs_value) => {
                split.options.push(token.clone());
                if needs_value {
                    if let Some(value) = tokens.next() {
                        split.options.push(value.clone());
                    }
                }
            }
            None => split.operands.push(token.clone()),
        }
    }

    split
}

impl Cli {
    /// The clap command for a palette.
    pub fn command_for(palette: Palette) -> Command {
        let cmd = Cli::command()
            .name(palette.name())
            .bin_name(palette.name())
            .about(palette.about());

        match palette {
            Palette::Scripts => cmd,
            Palette::Flow => cmd.mut_arg("dir", |arg| arg.hide(true)),
        }
    }

    /// Parse a full command line (including the binary name).
    ///
    /// # Errors
    ///
    /// Returns a clap error for malformed launcher options, for `--dir` given
    /// to `flow`, and for `--help`/`--version` (which clap reports through
    /// its error type).
    pub fn try_parse_invocation(
        palette: Palette,
        args: impl IntoIterator<Item = String>,
    ) -> Result<(Cli, InvocationRequest), clap::Error> {
        let mut args = args.into_iter();
        let bin = args.next().unwrap_or_else(|| palette.name().to_string());
        let raw: Vec<String> = args.collect();

        let mut cmd = Cli::command_for(palette);
        cmd.build();
        let split = split_args(&raw, &cmd);

        // clap only sees option tokens, so an operand can never be taken
        // as the value of a trailing `--config`
        let clap_args = std::iter::once(bin).chain(split.options);
        let matches = cmd.try_get_matches_from_mut(clap_args)?;
        let mut cli = Cli::from_arg_matches(&matches)?;
        cli.query = split.operands;

        if palette == Palette::Flow && cli.dir.is_some() {
            return Err(cmd.error(
                ErrorKind::ArgumentConflict,
                "--dir only applies to `scripts`; flow commands come from the config",
            ));
        }

        let request = InvocationRequest::new(cli.list, cli.query.clone(), split.passthrough);
        Ok((cli, request))
    }

    /// Parse the process arguments, exiting on usage errors like clap does.
    pub fn parse_invocation(palette: Palette) -> (Cli, InvocationRequest) {
        match Cli::try_parse_invocation(palette, std::env::args()) {
            Ok(parsed) => parsed,
            Err(e) => e.exit(),
        }
    }

    /// `Some` when the command line turns select-one on or off.
    pub fn select_one_override(&self) -> Option<bool> {
        if self.no_select_one {
            Some(false)
        } else if self.select_one {
            Some(true)
        } else {
            None
        }
    }

    /// Selector backend requested on the command line.
    pub fn backend_override(&self) -> Option<SelectorBackend> {
        self.backend.map(Into::into)
    }

    /// Generate shell completions for a palette.
    pub fn generate_completions(palette: Palette, shell: CliShell, out: &mut dyn Write) {
        let mut cmd = Cli::command_for(palette);
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, palette.name(), out);
    }
}
