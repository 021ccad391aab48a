//! Test fixtures: throwaway scripts directories, config files, and the
//! binaries under test with the user config isolated.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// A config home with nothing in it, so the developer's own
/// `~/.config/toolbox/config.toml` never leaks into a test.
const EMPTY_CONFIG_HOME: &str = "/nonexistent/toolbox-test-home";

fn isolate(mut cmd: Command) -> Command {
    cmd.env("XDG_CONFIG_HOME", EMPTY_CONFIG_HOME)
        .env("HOME", EMPTY_CONFIG_HOME)
        .env_remove("RUST_LOG");
    cmd
}

/// The `scripts` binary.
pub fn scripts() -> Command {
    isolate(cargo_bin_cmd!("scripts"))
}

/// The `flow` binary.
pub fn flow() -> Command {
    isolate(cargo_bin_cmd!("flow"))
}

/// Write a file and return its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Write an executable file and return its path.
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = write_file(dir, name, content);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
    path
}

/// A scripts directory with one executable `/bin/sh` script per entry.
pub fn create_scripts_dir(scripts: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, body) in scripts {
        write_script(dir.path(), name, &format!("#!/bin/sh\n{body}\n"));
    }
    dir
}

/// `update`, `deploy` and `clean`, each exiting 0 without a summary.
pub fn standard_scripts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("update", "exit 0"),
        ("deploy", "exit 0"),
        ("clean", "exit 0"),
    ]
}

/// Scripts with a header comment each.
pub fn described_scripts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("update", "# Pull the latest changes\nexit 0"),
        ("deploy", "# Ship the site to production\nexit 0"),
        ("clean", "exit 0"),
    ]
}

/// A script that prints each argument on its own line.
pub const PRINT_ARGS: &str = "for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done";

/// Write `content` as a config file in its own temp dir.
pub fn create_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "config.toml", content);
    (dir, path)
}

/// Config declaring `update`, `deploy` and `clean` as flow commands.
pub const FLOW_COMMANDS: &str = r#"
[[commands]]
name = "update"
program = "/bin/echo"
args = ["updating"]

[[commands]]
name = "deploy"
program = "/bin/echo"
args = ["deploying"]

[[commands]]
name = "clean"
program = "/bin/echo"
args = ["cleaning"]
"#;
