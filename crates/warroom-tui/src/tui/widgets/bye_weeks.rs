// Bye weeks widget: roster count per bye week with conflict markers.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use warroom_core::draft::ByeConflict;

use crate::app::App;

/// Marker drawn next to a bye week that has a conflict.
pub const CONFLICT_DOT: &str = "●";

/// Color for a bye conflict level: yellow, orange, red.
pub fn conflict_color(level: ByeConflict) -> Color {
    match level {
        ByeConflict::Caution => Color::Yellow,
        ByeConflict::Warning => Color::Rgb(249, 115, 22),
        ByeConflict::Severe => Color::Red,
    }
}

/// A colored dot span for `count` players sharing a week, or an empty span.
pub fn conflict_span(count: u32) -> Span<'static> {
    match ByeConflict::from_count(count) {
        Some(level) => Span::styled(CONFLICT_DOT, Style::default().fg(conflict_color(level))),
        None => Span::raw(" "),
    }
}

/// Render the bye-week tally into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Bye Weeks");
    let tally = app.engine.bye_tally();

    if tally.is_empty() {
        let paragraph = Paragraph::new("  No bye weeks yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tally
        .iter()
        .map(|(week, count)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" Wk {:>2}: {} ", week, count)),
                conflict_span(count),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
