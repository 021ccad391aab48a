//! Footer widget for the picker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::app::AppMode;
use crate::tui::theme::Theme;

/// Footer widget showing keybinding hints.
pub struct Footer<'a> {
    mode: &'a AppMode,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    /// Create a new footer widget.
    pub fn new(mode: &'a AppMode, theme: &'a Theme) -> Self {
        Self { mode, theme }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.mode {
            AppMode::Normal => &[
                ("j/k", "move"),
                ("Enter", "run"),
                ("/", "filter"),
                ("?", "help"),
                ("q", "cancel"),
            ],
            AppMode::Filter => &[
                ("↑/↓", "move"),
                ("Enter", "run"),
                ("Tab", "keys"),
                ("Esc", "cancel"),
            ],
            AppMode::Help => &[("any key", "close")],
        }
    }

    /// Build the footer line, dropping action names when space is short.
    fn build_line(&self, width: u16) -> Line<'a> {
        let hints = self.hints();
        let full_width: usize = hints
            .iter()
            .map(|(key, action)| key.chars().count() + action.len() + 3)
            .sum();

        let mut spans = vec![Span::raw(" ")];
        let show_actions = (width as usize) >= full_width + 2;

        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", self.theme.footer()));
            }
            spans.push(Span::styled(*key, self.theme.key()));
            if show_actions {
                spans.push(Span::styled(format!(" {action} "), self.theme.footer()));
            }
        }

        Line::from(spans)
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        Paragraph::new(self.build_line(area.width)).render(area, buf);
    }
}
