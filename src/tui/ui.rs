//! Picker rendering and event loop.

use std::io::{self, Stderr};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::app::{App, AppMode};
use super::input::handle_event;
use super::layout::{centered_rect_fixed, PickerLayout};
use super::theme::Theme;
use super::widgets::{CommandList, EmptyCommands, Filter, Footer, Header};

/// Blink interval for cursor (in milliseconds).
const CURSOR_BLINK_MS: u64 = 530;

/// Set while the terminal is in raw mode.
static TERMINAL_RAW_MODE: AtomicBool = AtomicBool::new(false);

static PANIC_HOOK: Once = Once::new();

/// RAII guard for terminal state.
///
/// The picker draws on stderr so stdout stays clean for the command it
/// launches. The terminal is restored on drop, including during a panic.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalGuard {
    /// Put the terminal into raw mode on the alternate screen.
    pub fn new() -> Result<Self> {
        setup_panic_hook();

        enable_raw_mode().context("Failed to enable raw mode")?;
        TERMINAL_RAW_MODE.store(true, Ordering::SeqCst);

        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen, cursor::Hide) {
            restore();
            return Err(e).context("Failed to enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stderr)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore();
                Err(e).context("Failed to create terminal")
            }
        }
    }

    /// Get a mutable reference to the terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    if TERMINAL_RAW_MODE.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, cursor::Show);
    }
}

fn setup_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            restore();
            original_hook(panic_info);
        }));
    });
}

/// Run the picker until the user chooses or cancels.
///
/// The outcome is read back from `app.chosen()`.
pub fn run_picker(app: &mut App, theme: &Theme) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    run_loop(guard.terminal(), app, theme)
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    let mut last_blink = Instant::now();
    let mut blink_state = true;

    while !app.should_quit() {
        if last_blink.elapsed() >= Duration::from_millis(CURSOR_BLINK_MS) {
            blink_state = !blink_state;
            last_blink = Instant::now();
        }

        terminal.draw(|frame| render(frame, app, theme, blink_state))?;

        if event::poll(Duration::from_millis(50))? {
            if handle_event(app, event::read()?) {
                break;
            }
            blink_state = true;
            last_blink = Instant::now();
        }
    }

    Ok(())
}

/// Render the picker.
///
/// Also tells the app how many rows the list has, so paging and scrolling
/// follow the terminal size.
pub fn render(frame: &mut Frame, app: &mut App, theme: &Theme, blink_state: bool) {
    let layout = PickerLayout::new(frame.area(), app.show_footer());
    app.set_page_size(layout.list_rows());

    let header = Header::new(app.title(), app.visible_count(), app.total_count(), theme);
    frame.render_widget(header, layout.header);

    let filter = Filter::new(app.filter_text(), *app.mode() == AppMode::Filter, theme)
        .blink(blink_state);
    frame.render_widget(filter, layout.filter);

    render_commands(frame, app, theme, layout.list);

    if app.show_footer() {
        frame.render_widget(Footer::new(app.mode(), theme), layout.footer);
    }

    if *app.mode() == AppMode::Help {
        render_help_overlay(frame, theme);
    }
}

fn render_commands(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let visible = app.visible_commands();

    if visible.is_empty() {
        let empty = if app.total_count() == 0 {
            EmptyCommands::no_commands(theme)
        } else {
            EmptyCommands::no_matches(theme)
        };
        frame.render_widget(empty, area);
        return;
    }

    let list = CommandList::new(&visible, app.selected_index(), theme)
        .scroll_offset(app.scroll_offset())
        .highlight(app.filter_text(), app.options().case_sensitive);
    frame.render_widget(list, area);
}

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let help_area = centered_rect_fixed(46, 16, frame.area());
    frame.render_widget(Clear, help_area);

    let row = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme.key()),
            Span::styled(action, theme.summary()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.bold())),
        Line::from(""),
        row("↑/↓ j/k", "Move up/down"),
        row("PgUp/PgDn", "Move by a page"),
        row("Home/End", "First/last command"),
        row("Enter", "Run selected command"),
        row("/", "Edit the filter"),
        row("Tab", "Leave the filter"),
        row("Ctrl+U", "Clear the filter"),
        row("?", "Toggle this help"),
        row("Esc/q", "Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            theme.filter_placeholder(),
        )),
    ];

    let help = Paragraph::new(help_lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .alignment(Alignment::Left);

    frame.render_widget(help, help_area);
}
