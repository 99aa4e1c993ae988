// TUI dashboard: layout, input handling, and widget rendering.
//
// The loop is synchronous: poll the keyboard for up to one tick, apply any
// resulting command to the app, redraw. Everything the widgets show is read
// straight from the draft engine each frame.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tracing::info;

use crate::app::App;
use layout::{build_layout, AppLayout};

/// Redraw interval (~30 fps).
const TICK: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that is not part of the draft itself.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Highlighted row in the available players table.
    pub selected: usize,
    /// Whether the quit confirmation prompt is showing.
    pub confirm_quit: bool,
    /// Outcome of the last action, shown in the status bar.
    pub status_message: Option<String>,
}

impl ViewState {
    /// Keep the selection inside a list of `len` rows.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self, len: usize, step: usize) {
        self.selected = self.selected.saturating_add(step);
        self.clamp_selection(len);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, app: &App) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, app);
    widgets::available::render(frame, layout.available, app);
    widgets::roster::render(frame, layout.roster, app);
    widgets::bye_weeks::render(frame, layout.bye_weeks, app);
    render_help_bar(frame, &layout, app);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, app: &App) {
    let (text, style) = if app.view.confirm_quit {
        (
            " Quit the draft? y:Yes | n:No",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            " q:Quit | j/k:Move | PgUp/PgDn:Page | Enter/d:Draft",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(text, style)]))
        .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Draws, polls for one key press, applies it; repeats.
/// 4. Restores the terminal, also when the loop fails.
pub fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    info!("TUI started");
    let result = event_loop(&mut terminal, app);

    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| render_frame(frame, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key_event) => {
                if let Some(command) =
                    input::handle_key(key_event, &mut app.view, app.engine.available_ids())
                {
                    app.handle(command);
                }
            }
            Event::Resize(_, _) => {
                // Next draw picks up the new size.
            }
            _ => {}
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
