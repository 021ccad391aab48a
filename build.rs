//! Build script for toolbox.
//!
//! Renders man pages for `scripts` and `flow` with clap_mangen.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Command, CommandFactory, Parser, ValueEnum};

/// Options shared by both binaries.
///
/// A build script cannot use the crate it builds, so this mirrors
/// `src/cli.rs`.
#[derive(Args)]
struct Options {
    /// Command to run, or search text for the picker
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// List commands non-interactively
    #[arg(short, long)]
    list: bool,

    /// Print the list as JSON (with --list)
    #[arg(long)]
    json: bool,

    /// Exclude commands matching pattern (can be repeated)
    #[arg(short, long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Run the only match of QUERY without opening the picker (default)
    #[arg(short = '1', long = "select-1", overrides_with = "no_select_one")]
    select_one: bool,

    /// Always open the picker, even for a single match
    #[arg(long = "no-select-1")]
    no_select_one: bool,

    /// Picker backend
    #[arg(short, long, value_name = "BACKEND", value_enum)]
    backend: Option<Backend>,

    /// Show command without executing
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// Print an example config file
    #[arg(long)]
    print_config: bool,
}

#[derive(Parser)]
#[command(name = "scripts", version)]
#[command(about = "Fuzzy-pick a script from your scripts directory and run it")]
#[command(
    long_about = "scripts offers every executable file of your scripts directory in a fuzzy \
    selector and runs the one you pick. Give a script name to run it directly; \
    arguments after `--` are passed to the script unchanged.\n\n\
    The scripts directory is --dir, else `dir` under [scripts] in the config, \
    else the nearest scripts/ directory above the working directory."
)]
struct ScriptsCli {
    #[command(flatten)]
    options: Options,

    /// Directory to scan for scripts
    #[arg(short, long, value_name = "PATH")]
    dir: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "flow", version)]
#[command(about = "Fuzzy-pick one of your flow commands and run it")]
#[command(
    long_about = "flow offers its built-in subcommands, plus the [[commands]] declared in \
    the config, in a fuzzy selector and runs the one you pick. Give a command name \
    to run it directly; arguments after `--` are passed to it unchanged."
)]
struct FlowCli {
    #[command(flatten)]
    options: Options,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    Auto,
    Fzf,
    Builtin,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

fn render_man(cmd: Command, out_dir: &Path, docs_dir: &Path) {
    let name = cmd.get_name().to_string();
    let mut buffer = Vec::new();
    if let Err(e) = clap_mangen::Man::new(cmd).render(&mut buffer) {
        println!("cargo:warning=Failed to render man page for {name}: {e}");
        return;
    }

    let man_path = out_dir.join(format!("{name}.1"));
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write {}: {e}", man_path.display());
        return;
    }

    if docs_dir.exists() {
        let _ = fs::copy(&man_path, docs_dir.join(format!("{name}.1")));
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TOOLBOX_GEN_MANPAGE");

    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("TOOLBOX_GEN_MANPAGE").is_err() {
        return;
    }

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    let docs_dir = env::var_os("CARGO_MANIFEST_DIR")
        .map(|dir| PathBuf::from(dir).join("docs"))
        .unwrap_or_default();

    render_man(ScriptsCli::command(), &out_dir, &docs_dir);
    render_man(FlowCli::command(), &out_dir, &docs_dir);
}
