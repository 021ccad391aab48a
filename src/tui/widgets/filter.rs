//! Filter line widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Query line with a prompt.
pub struct Filter<'a> {
    query: &'a str,
    is_active: bool,
    theme: &'a Theme,
    blink_state: bool,
}

impl<'a> Filter<'a> {
    /// Create a new filter widget.
    pub fn new(query: &'a str, is_active: bool, theme: &'a Theme) -> Self {
        Self {
            query,
            is_active,
            theme,
            blink_state: true,
        }
    }

    /// Set the blink state for the cursor.
    pub fn blink(mut self, state: bool) -> Self {
        self.blink_state = state;
        self
    }

    fn build_line(&self) -> Line<'a> {
        if self.is_active {
            let cursor = if self.blink_state {
                Span::styled("_", self.theme.filter_active())
            } else {
                Span::raw(" ")
            };
            Line::from(vec![
                Span::styled(" > ", self.theme.filter_active()),
                Span::styled(self.query, self.theme.filter_active()),
                cursor,
            ])
        } else if !self.query.is_empty() {
            Line::from(vec![
                Span::styled(" > ", self.theme.filter()),
                Span::styled(self.query, self.theme.filter()),
            ])
        } else {
            Line::from(Span::styled(
                " Type / to filter...",
                self.theme.filter_placeholder(),
            ))
        }
    }
}

impl Widget for Filter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        Paragraph::new(self.build_line()).render(area, buf);
    }
}
