//! Application state for the picker.

use crate::filter::{filter_commands, MatchOptions};
use crate::registry::CommandDescriptor;

/// Rows moved by PageUp/PageDown before the first render sets a real size.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Picker mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Navigation keys, `/` to filter.
    Normal,
    /// Typing edits the query.
    #[default]
    Filter,
    /// Help overlay.
    Help,
}

/// Picker state over a borrowed list of commands.
pub struct App<'a> {
    commands: &'a [CommandDescriptor],
    options: MatchOptions,
    title: String,
    show_footer: bool,

    mode: AppMode,
    /// Mode to return to when help closes.
    previous_mode: AppMode,
    filter_text: String,
    /// Position within `visible`.
    selected: usize,
    scroll_offset: usize,
    page_size: usize,

    /// Indices into `commands`, best match first.
    visible: Vec<usize>,
    should_quit: bool,
    chosen: Option<usize>,
}

impl<'a> App<'a> {
    /// Create a picker over `commands`.
    pub fn new(commands: &'a [CommandDescriptor], options: MatchOptions) -> Self {
        Self {
            commands,
            options,
            title: String::new(),
            show_footer: true,
            mode: AppMode::Filter,
            previous_mode: AppMode::Filter,
            filter_text: String::new(),
            selected: 0,
            scroll_offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
            visible: (0..commands.len()).collect(),
            should_quit: false,
            chosen: None,
        }
    }

    /// Start with `query` already typed.
    pub fn with_prefilter(mut self, query: Option<&str>) -> Self {
        if let Some(query) = query {
            self.set_filter(query.to_string());
        }
        self
    }

    /// Header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Show the key hints line.
    pub fn with_footer(mut self, show_footer: bool) -> Self {
        self.show_footer = show_footer;
        self
    }

    // ==================== Getters ====================

    /// Get the current mode.
    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    /// Get the header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Check if the footer is shown.
    pub fn show_footer(&self) -> bool {
        self.show_footer
    }

    /// Get the match options.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Get the current filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Check if the picker is done.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Index into the command list of the chosen command, if any.
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Get the selected position within the visible list.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Get the scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Get the number of commands in total.
    pub fn total_count(&self) -> usize {
        self.commands.len()
    }

    /// Get the number of visible commands.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible commands, best match first.
    pub fn visible_commands(&self) -> Vec<&'a CommandDescriptor> {
        self.visible.iter().map(|&i| &self.commands[i]).collect()
    }

    /// Get the highlighted command.
    pub fn selected_command(&self) -> Option<&'a CommandDescriptor> {
        self.visible.get(self.selected).map(|&i| &self.commands[i])
    }

    // ==================== Modes ====================

    /// Set the mode.
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        if self.mode == AppMode::Help {
            self.mode = self.previous_mode.clone();
        } else {
            self.previous_mode = self.mode.clone();
            self.mode = AppMode::Help;
        }
    }

    // ==================== Filter ====================

    /// Replace the filter text.
    pub fn set_filter(&mut self, text: String) {
        self.filter_text = text;
        self.update_visible();
    }

    /// Append a character to the filter text.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_text.push(c);
        self.update_visible();
    }

    /// Remove the last character from the filter text.
    pub fn pop_filter_char(&mut self) {
        self.filter_text.pop();
        self.update_visible();
    }

    /// Clear the filter text.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.update_visible();
    }

    fn update_visible(&mut self) {
        self.visible = filter_commands(&self.filter_text, self.commands, self.options)
            .into_iter()
            .map(|(idx, _score)| idx)
            .collect();

        // Best match goes back to the top on every edit
        self.selected = 0;
        self.scroll_offset = 0;
    }

    // ==================== Navigation ====================

    /// Set how many rows the list shows.
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
        self.ensure_selected_visible();
    }

    /// Move selection up.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_selected_visible();
    }

    /// Move selection down.
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
        self.ensure_selected_visible();
    }

    /// Move selection up by one page.
    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size);
        self.ensure_selected_visible();
    }

    /// Move selection down by one page.
    pub fn page_down(&mut self) {
        let last = self.visible.len().saturating_sub(1);
        self.selected = (self.selected + self.page_size).min(last);
        self.ensure_selected_visible();
    }

    /// Move selection to the first item.
    pub fn move_to_first(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    /// Move selection to the last item.
    pub fn move_to_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.page_size {
            self.scroll_offset = self.selected + 1 - self.page_size;
        }
    }

    // ==================== Actions ====================

    /// Choose the highlighted command and finish.
    ///
    /// Does nothing when no command is visible.
    pub fn confirm(&mut self) {
        if let Some(&idx) = self.visible.get(self.selected) {
            self.chosen = Some(idx);
            self.should_quit = true;
        }
    }

    /// Finish without choosing.
    pub fn cancel(&mut self) {
        self.chosen = None;
        self.should_quit = true;
    }
}
