//! Color theme for the picker.
//!
//! A theme is a handful of role colors; every widget style is derived from
//! them. `Color::Reset` in a role means "no color", and the styles fall back
//! to modifiers (bold, underline) so the picker stays usable in monochrome.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme as ThemeConfig;

/// Color theme for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Header bar and selection bar background.
    accent: Color,
    /// Ordinary text.
    text: Color,
    /// Summaries, placeholders, footer.
    muted: Color,
    /// Query text and matched characters.
    query: Color,
    /// Key names in the footer and help, and the cursor marker.
    key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&ThemeConfig::Default)
    }
}

impl Theme {
    /// Create a theme from configuration.
    pub fn new(config: &ThemeConfig) -> Self {
        match config {
            ThemeConfig::Default => Self {
                accent: Color::Blue,
                text: Color::White,
                muted: Color::DarkGray,
                query: Color::Yellow,
                key: Color::Cyan,
            },
            ThemeConfig::Minimal => Self {
                accent: Color::Reset,
                text: Color::White,
                muted: Color::DarkGray,
                query: Color::Cyan,
                key: Color::Gray,
            },
            ThemeConfig::None => Self {
                accent: Color::Reset,
                text: Color::Reset,
                muted: Color::Reset,
                query: Color::Reset,
                key: Color::Reset,
            },
        }
    }

    fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    /// Header title.
    pub fn header(&self) -> Style {
        self.header_count().add_modifier(Modifier::BOLD)
    }

    /// Header `shown/total` counter.
    pub fn header_count(&self) -> Style {
        Self::fg(self.text).bg(self.accent)
    }

    /// Filter text.
    pub fn filter(&self) -> Style {
        Self::fg(self.query)
    }

    /// Filter text while it is being edited.
    pub fn filter_active(&self) -> Style {
        self.filter().add_modifier(Modifier::BOLD)
    }

    pub fn filter_placeholder(&self) -> Style {
        Self::fg(self.muted).add_modifier(Modifier::ITALIC)
    }

    /// Command name.
    pub fn name(&self) -> Style {
        Self::fg(self.text)
    }

    /// The selected row. Without an accent color it is underlined instead.
    pub fn selected(&self) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if self.accent == Color::Reset {
            style.fg(self.query).add_modifier(Modifier::UNDERLINED)
        } else {
            style.fg(self.text).bg(self.accent)
        }
    }

    /// The `>` marker in front of the selected row.
    pub fn cursor(&self) -> Style {
        Self::fg(self.key).add_modifier(Modifier::BOLD)
    }

    /// Characters matched by the query, layered over `base`.
    pub fn highlight(&self, base: Style) -> Style {
        let style = base.add_modifier(Modifier::BOLD);
        if self.query == Color::Reset {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style.fg(self.query)
        }
    }

    pub fn summary(&self) -> Style {
        Self::fg(self.muted).add_modifier(Modifier::DIM)
    }

    pub fn footer(&self) -> Style {
        Self::fg(self.muted)
    }

    /// Key names in hints.
    pub fn key(&self) -> Style {
        Self::fg(self.key).add_modifier(Modifier::BOLD)
    }

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }
}
