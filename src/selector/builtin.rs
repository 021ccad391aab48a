//! Selection through the built-in picker.

use std::io::{self, IsTerminal};

use log::debug;

use super::Selector;
use crate::config::AppearanceConfig;
use crate::error::{LauncherError, Result};
use crate::filter::MatchOptions;
use crate::registry::CommandDescriptor;
use crate::tui::{run_picker, App, Theme};

/// The ratatui picker, drawn on stderr.
#[derive(Debug, Clone, Default)]
pub struct BuiltinSelector {
    title: String,
    options: MatchOptions,
    appearance: AppearanceConfig,
}

impl BuiltinSelector {
    /// Create a picker with the given header title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the match options.
    pub fn options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set theme and footer visibility.
    pub fn appearance(mut self, appearance: AppearanceConfig) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Selector for BuiltinSelector {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn select(
        &mut self,
        commands: &[CommandDescriptor],
        prefilter: Option<&str>,
    ) -> Result<Option<usize>> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(LauncherError::NoTerminal);
        }

        let mut app = App::new(commands, self.options)
            .with_title(self.title.clone())
            .with_prefilter(prefilter)
            .with_footer(self.appearance.show_footer);
        let theme = Theme::new(&self.appearance.theme);

        run_picker(&mut app, &theme).map_err(|e| LauncherError::SelectorFailed {
            selector: self.name().to_string(),
            message: format!("{e:#}"),
        })?;

        debug!("Picker finished with {:?}", app.chosen());
        Ok(app.chosen())
    }
}
