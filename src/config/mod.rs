//! Configuration module.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (highest priority)
//! - `--config <path>`
//! - User-level `~/.config/toolbox/config.toml`

pub mod file;
mod types;

pub use file::{generate_example_config, load_config, load_config_from_path};
pub use types::{
    AppearanceConfig, AppearanceLayer, CommandConfig, Config, ConfigLayer, ExcludeConfig,
    ScriptsConfig, ScriptsLayer, SelectorBackend, SelectorConfig, SelectorLayer, Theme,
};
