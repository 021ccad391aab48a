//! Layout calculations for the picker.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Picker areas, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct PickerLayout {
    /// Header area.
    pub header: Rect,
    /// Filter line area.
    pub filter: Rect,
    /// Command list area.
    pub list: Rect,
    /// Footer area (zero height when hidden).
    pub footer: Rect,
}

impl PickerLayout {
    /// Split `area` into the picker rows.
    pub fn new(area: Rect, show_footer: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(u16::from(show_footer)),
            ])
            .split(area);

        Self {
            header: chunks[0],
            filter: chunks[1],
            list: chunks[2],
            footer: chunks[3],
        }
    }

    /// Rows available for commands.
    pub fn list_rows(&self) -> usize {
        self.list.height as usize
    }
}

/// Create a centered rect with fixed dimensions, clamped to `area`.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let actual_width = width.min(area.width);
    let actual_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(actual_width)) / 2;
    let y = area.y + (area.height.saturating_sub(actual_height)) / 2;

    Rect::new(x, y, actual_width, actual_height)
}
