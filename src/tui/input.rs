//! Input handling for the picker.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, AppMode};

/// Handle a terminal event.
///
/// Returns true once the picker is done (chosen or cancelled).
pub fn handle_event(app: &mut App, event: Event) -> bool {
    if let Event::Key(key) = event {
        // Windows reports releases too
        if key.kind == KeyEventKind::Press {
            handle_key(app, key);
        }
    }
    app.should_quit()
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always cancels, whatever the mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.cancel();
        return;
    }

    if navigate(app, key) {
        return;
    }

    match app.mode().clone() {
        AppMode::Normal => handle_normal_mode(app, key),
        AppMode::Filter => handle_filter_mode(app, key),
        AppMode::Help => app.toggle_help(),
    }
}

/// Keys that move the selection in both list modes.
fn navigate(app: &mut App, key: KeyEvent) -> bool {
    if *app.mode() == AppMode::Help {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => app.move_up(),
        (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => app.move_down(),
        (KeyCode::PageUp, _) => app.page_up(),
        (KeyCode::PageDown, _) => app.page_down(),
        (KeyCode::Home, _) => app.move_to_first(),
        (KeyCode::End, _) => app.move_to_last(),
        (KeyCode::Enter, _) => app.confirm(),
        _ => return false,
    }
    true
}

/// Handle keys in normal mode.
///
/// - j/k: move down/up
/// - g/G: first/last
/// - /: edit the filter
/// - ?: toggle help
/// - q/Esc: cancel
fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('k') => app.move_up(),
        KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('g') => app.move_to_first(),
        KeyCode::Char('G') => app.move_to_last(),
        KeyCode::Char('/') => app.set_mode(AppMode::Filter),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') | KeyCode::Esc => app.cancel(),
        _ => {}
    }
}

/// Handle keys in filter mode.
///
/// - Printable characters: append to the query
/// - Backspace: remove last character
/// - Ctrl+U: clear the query
/// - Tab: switch to normal mode
/// - Esc: cancel
fn handle_filter_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Tab => app.set_mode(AppMode::Normal),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_filter(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_filter_char(c)
        }
        _ => {}
    }
}
