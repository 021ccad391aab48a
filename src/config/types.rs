//! Configuration type definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::registry::{CommandDescriptor, Target};
use crate::utils::global_config_file;

/// Which interactive chooser to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorBackend {
    /// `fzf` when it is on `PATH`, otherwise the built-in picker.
    #[default]
    Auto,
    /// Always use `fzf`.
    Fzf,
    /// Always use the built-in picker.
    Builtin,
}

/// Color theme for the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Full color theme.
    #[default]
    Default,
    /// Minimal colors.
    Minimal,
    /// No colors (monochrome).
    None,
}

/// Selector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Picker backend.
    #[serde(default)]
    pub backend: SelectorBackend,
    /// Run the only match of a prefilter without opening the picker.
    #[serde(default = "default_true")]
    pub select_one: bool,
    /// Match the query against summaries too.
    #[serde(default = "default_true")]
    pub search_summaries: bool,
    /// Case sensitive search.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            backend: SelectorBackend::default(),
            select_one: true,
            search_summaries: true,
            case_sensitive: false,
        }
    }
}

/// Scripts directory settings for the `scripts` palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Directory to scan (`~` is expanded).
    #[serde(default)]
    pub dir: Option<String>,
    /// File extension to interpreter, e.g. `py = "python3"`.
    #[serde(default)]
    pub interpreters: HashMap<String, String>,
    /// Summaries that replace the ones read from the files.
    #[serde(default)]
    pub summaries: HashMap<String, String>,
    /// Read summaries from script headers.
    #[serde(default = "default_true")]
    pub read_summaries: bool,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            interpreters: HashMap::new(),
            summaries: HashMap::new(),
            read_summaries: true,
        }
    }
}

/// Exclude patterns configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Glob patterns to exclude.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Appearance configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Color theme.
    #[serde(default)]
    pub theme: Theme,
    /// Show help footer.
    #[serde(default = "default_true")]
    pub show_footer: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_footer: true,
        }
    }
}

/// An extra `flow` command declared in the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Command name.
    pub name: String,
    /// Program to run (looked up on `PATH` if not a path).
    pub program: String,
    /// Arguments placed before any forwarded ones.
    #[serde(default)]
    pub args: Vec<String>,
    /// One-line summary.
    #[serde(default)]
    pub summary: Option<String>,
}

impl CommandConfig {
    /// Convert into a registry descriptor.
    pub fn to_descriptor(&self) -> CommandDescriptor {
        let expanded = shellexpand::tilde(&self.program).into_owned();
        let target = Target::program_with_args(expanded, self.args.clone());
        match &self.summary {
            Some(summary) => CommandDescriptor::with_summary(&self.name, target, summary),
            None => CommandDescriptor::new(&self.name, target),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Selector settings.
    #[serde(default)]
    pub selector: SelectorConfig,
    /// Scripts settings.
    #[serde(default)]
    pub scripts: ScriptsConfig,
    /// Exclude patterns.
    #[serde(default)]
    pub exclude: ExcludeConfig,
    /// Appearance settings.
    #[serde(default)]
    pub appearance: AppearanceConfig,
    /// Extra `flow` commands.
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

impl Config {
    /// Get the config file path in the user's config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        global_config_file()
    }

    /// The configured scripts directory with `~` expanded.
    pub fn scripts_dir(&self) -> Option<PathBuf> {
        self.scripts
            .dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
    }

    /// Apply a config file layer on top of this config.
    ///
    /// Only keys present in the layer replace current values. Maps and
    /// exclude patterns accumulate.
    pub fn apply(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            selector,
            scripts,
            exclude,
            appearance,
            commands,
        } = layer;

        set(&mut self.selector.backend, selector.backend);
        set(&mut self.selector.select_one, selector.select_one);
        set(&mut self.selector.search_summaries, selector.search_summaries);
        set(&mut self.selector.case_sensitive, selector.case_sensitive);

        if scripts.dir.is_some() {
            self.scripts.dir = scripts.dir;
        }
        self.scripts.interpreters.extend(scripts.interpreters);
        self.scripts.summaries.extend(scripts.summaries);
        set(&mut self.scripts.read_summaries, scripts.read_summaries);

        self.exclude.patterns.extend(exclude.patterns);

        set(&mut self.appearance.theme, appearance.theme);
        set(&mut self.appearance.show_footer, appearance.show_footer);

        // Earlier layers declare first, so their commands win on name clashes
        self.commands.extend(commands);
    }
}

impl From<ConfigLayer> for Config {
    fn from(layer: ConfigLayer) -> Self {
        let mut config = Config::default();
        config.apply(layer);
        config
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// One config file as written: every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub selector: SelectorLayer,
    #[serde(default)]
    pub scripts: ScriptsLayer,
    #[serde(default)]
    pub exclude: ExcludeConfig,
    #[serde(default)]
    pub appearance: AppearanceLayer,
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

/// `[selector]` keys of one config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorLayer {
    pub backend: Option<SelectorBackend>,
    pub select_one: Option<bool>,
    pub search_summaries: Option<bool>,
    pub case_sensitive: Option<bool>,
}

/// `[scripts]` keys of one config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptsLayer {
    pub dir: Option<String>,
    #[serde(default)]
    pub interpreters: HashMap<String, String>,
    #[serde(default)]
    pub summaries: HashMap<String, String>,
    pub read_summaries: Option<bool>,
}

/// `[appearance]` keys of one config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppearanceLayer {
    pub theme: Option<Theme>,
    pub show_footer: Option<bool>,
}

fn default_true() -> bool {
    true
}
