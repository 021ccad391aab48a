//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::types::{Config, ConfigLayer};
use crate::error::{LauncherError, Result};

/// Load configuration from the specified path.
///
/// # Errors
///
/// Returns `InvalidConfig` if the file cannot be read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    read_layer(path).map(Config::from)
}

fn read_layer(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path).map_err(|e| LauncherError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| LauncherError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration with proper priority and merging.
///
/// Layers, lowest priority first:
/// 1. `~/.config/toolbox/config.toml` (user-level)
/// 2. CLI argument `--config <path>`
///
/// With `no_config` set, both are skipped and defaults are returned.
///
/// # Errors
///
/// Returns `InvalidConfig` if the file given on the command line cannot be
/// read or parsed. A broken user-level config only produces a warning.
pub fn load_config(cli_config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        debug!("Skipping config files (--no-config)");
        return Ok(Config::default());
    }

    let user_config_path = Config::user_config_path();
    load_layers(user_config_path.as_deref(), cli_config_path)
}

fn load_layers(user_config_path: Option<&Path>, cli_config_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(user_config_path) = user_config_path {
        if user_config_path.exists() {
            match read_layer(user_config_path) {
                Ok(layer) => {
                    debug!("Loaded user config from {}", user_config_path.display());
                    config.apply(layer);
                }
                Err(e) => warn!("{e}\nUsing default settings."),
            }
        }
    }

    if let Some(cli_path) = cli_config_path {
        let layer = read_layer(cli_path)?;
        debug!("Loaded config from {}", cli_path.display());
        config.apply(layer);
    }

    Ok(config)
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# toolbox configuration
# Place this file at ~/.config/toolbox/config.toml, or pass --config <path>.
# Command-line flags override anything set here.

[selector]
# Picker backend: "auto" (fzf if installed), "fzf", "builtin"
backend = "auto"

# Run the only match of a search without opening the picker
select_one = true

# Match the search against summaries too
search_summaries = true

# Case sensitive search
case_sensitive = false

[scripts]
# Directory scanned by `scripts` (defaults to the nearest scripts/ directory)
# dir = "~/toolbox/scripts"

# Read a summary line from each script's docstring or header comment
read_summaries = true

# Run files with these extensions through an interpreter,
# even when they are not executable
[scripts.interpreters]
# py = "python3"
# rb = "ruby"

# Summaries that replace the ones found in the files
[scripts.summaries]
# deploy = "Deploy the site to production"

[exclude]
# Hide commands whose name matches (glob syntax)
patterns = [
    # "test-*",
]

[appearance]
# Color theme: "default", "minimal", "none"
theme = "default"

# Show key hints at the bottom of the picker
show_footer = true

# Extra commands for `flow`
# [[commands]]
# name = "up"
# program = "docker"
# args = ["compose", "up"]
# summary = "Start the local stack"
"#
    .to_string()
}
