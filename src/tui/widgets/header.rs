//! Header widget for the picker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Header showing the palette title and the match counter.
pub struct Header<'a> {
    title: &'a str,
    shown: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Create a new header widget.
    pub fn new(title: &'a str, shown: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            shown,
            total,
            theme,
        }
    }

    fn build_line(&self, width: u16) -> Line<'a> {
        let right = format!(" {}/{}  [?] ", self.shown, self.total);
        let max_title = (width as usize).saturating_sub(right.chars().count() + 2);
        let title = truncate_with_ellipsis(self.title, max_title);

        let left_len = title.chars().count() + 1;
        let padding = (width as usize).saturating_sub(left_len + right.chars().count());

        Line::from(vec![
            Span::styled(" ", self.theme.header()),
            Span::styled(title, self.theme.header()),
            Span::styled(" ".repeat(padding), self.theme.header()),
            Span::styled(right, self.theme.header_count()),
        ])
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let line = self.build_line(area.width);
        Paragraph::new(line)
            .style(self.theme.header())
            .render(area, buf);
    }
}

/// Truncate a string with ellipsis if it exceeds max length.
///
/// Counts characters, not bytes.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{truncated}…")
    }
}
