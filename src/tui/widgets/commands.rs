//! Command list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::filter::get_match_indices;
use crate::registry::CommandDescriptor;
use crate::tui::theme::Theme;
use crate::tui::widgets::header::truncate_with_ellipsis;

/// Widest name column before names get truncated.
const MAX_NAME_WIDTH: usize = 32;

/// Scrolling single-column list of commands with summaries.
pub struct CommandList<'a> {
    commands: &'a [&'a CommandDescriptor],
    selected: usize,
    scroll_offset: usize,
    query: &'a str,
    case_sensitive: bool,
    theme: &'a Theme,
}

impl<'a> CommandList<'a> {
    /// Create a new list widget.
    pub fn new(commands: &'a [&'a CommandDescriptor], selected: usize, theme: &'a Theme) -> Self {
        Self {
            commands,
            selected,
            scroll_offset: 0,
            query: "",
            case_sensitive: false,
            theme,
        }
    }

    /// Set the scroll offset.
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Highlight characters matched by `query`.
    pub fn highlight(mut self, query: &'a str, case_sensitive: bool) -> Self {
        self.query = query;
        self.case_sensitive = case_sensitive;
        self
    }

    fn name_width(&self) -> usize {
        self.commands
            .iter()
            .map(|c| c.name().chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_NAME_WIDTH)
    }

    fn build_line(&self, command: &CommandDescriptor, is_selected: bool, width: usize) -> Line<'a> {
        let base = if is_selected {
            self.theme.selected()
        } else {
            self.theme.name()
        };

        let marker = if is_selected { " > " } else { "   " };
        let mut spans = vec![Span::styled(marker, self.theme.cursor())];

        let name_width = self.name_width();
        let name = truncate_with_ellipsis(command.name(), name_width);
        let padding = name_width.saturating_sub(name.chars().count());
        spans.extend(self.highlighted(&name, base));

        if let Some(summary) = command.summary() {
            let used = marker.len() + name_width + 2;
            let room = width.saturating_sub(used);
            if room > 0 {
                spans.push(Span::raw(" ".repeat(padding + 2)));
                spans.push(Span::styled(
                    truncate_with_ellipsis(summary, room),
                    self.theme.summary(),
                ));
            }
        }

        Line::from(spans)
    }

    /// Split `text` into spans, styling matched characters.
    fn highlighted(&self, text: &str, base: Style) -> Vec<Span<'a>> {
        if self.query.trim().is_empty() {
            return vec![Span::styled(text.to_string(), base)];
        }

        let matched = get_match_indices(self.query, text, self.case_sensitive);
        let hit = self.theme.highlight(base);

        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_is_hit = false;

        for (i, c) in text.chars().enumerate() {
            let is_hit = matched.binary_search(&i).is_ok();
            if is_hit != run_is_hit && !run.is_empty() {
                let style = if run_is_hit { hit } else { base };
                spans.push(Span::styled(std::mem::take(&mut run), style));
            }
            run_is_hit = is_hit;
            run.push(c);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, if run_is_hit { hit } else { base }));
        }

        spans
    }
}

impl Widget for CommandList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let rows = area.height as usize;
        let visible = self.commands.iter().enumerate().skip(self.scroll_offset).take(rows);

        for (row, (idx, command)) in visible.enumerate() {
            let line = self.build_line(command, idx == self.selected, area.width as usize);
            buf.set_line(area.x, area.y + row as u16, &line, area.width);
        }
    }
}

/// Shown when the list is empty.
pub struct EmptyCommands<'a> {
    message: &'a str,
    hint: &'a str,
    theme: &'a Theme,
}

impl<'a> EmptyCommands<'a> {
    /// Nothing was discovered.
    pub fn no_commands(theme: &'a Theme) -> Self {
        Self {
            message: "No commands found",
            hint: "Press Esc to quit",
            theme,
        }
    }

    /// The query matches nothing.
    pub fn no_matches(theme: &'a Theme) -> Self {
        Self {
            message: "No commands match the filter",
            hint: "Press Backspace or Ctrl+U to edit the filter",
            theme,
        }
    }
}

impl Widget for EmptyCommands<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let y = area.y + area.height.saturating_sub(1) / 2;
        let centered = |text: &str| {
            let len = text.chars().count() as u16;
            area.x + area.width.saturating_sub(len) / 2
        };

        let line = Line::from(Span::styled(self.message, self.theme.summary()));
        buf.set_line(centered(self.message), y, &line, area.width);

        let hint_y = y + 2;
        if hint_y < area.y + area.height {
            let line = Line::from(Span::styled(self.hint, self.theme.filter_placeholder()));
            buf.set_line(centered(self.hint), hint_y, &line, area.width);
        }
    }
}
