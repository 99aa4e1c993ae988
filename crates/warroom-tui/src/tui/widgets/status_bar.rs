// Status bar widget: pick counter, pool size, data source, last action.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use warroom_core::catalog::CatalogMeta;

use crate::app::App;

/// Render the status bar into the given area.
///
/// Layout: [pick counter] | [available count] | [source] | [last action]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let engine = &app.engine;
    let mut spans = vec![
        Span::styled(
            format!(" Picks: {}", engine.pick_count()),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} available", engine.available_ids().len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(source_label(engine.catalog().meta()), Style::default().fg(Color::Cyan)),
    ];

    if engine.is_complete() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled("Pool exhausted", Style::default().fg(Color::Yellow)));
    }

    if let Some(message) = &app.view.status_message {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Green)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "FantasyPros CSV, updated 2025-08-20" or just the source name.
pub fn source_label(meta: &CatalogMeta) -> String {
    let source = meta.source.as_deref().unwrap_or("unknown source");
    match meta.updated_at {
        Some(ts) => format!("{}, updated {}", source, ts.format("%Y-%m-%d")),
        None => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use warroom_core::catalog::{Catalog, StaticSource};
    use warroom_core::draft::DraftEngine;
    use warroom_core::player::{PlayerId, PlayerRecord, Position};

    fn test_app() -> App {
        let source = StaticSource::new(vec![
            PlayerRecord::new(1, "A", Position::Quarterback, "BUF", Some(7)),
            PlayerRecord::new(2, "B", Position::Quarterback, "BAL", Some(7)),
        ]);
        App::new(DraftEngine::new(Catalog::load(&source).unwrap()))
    }

    fn render_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), app))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn source_label_without_timestamp() {
        let meta = CatalogMeta {
            source: Some("static".into()),
            updated_at: None,
        };
        assert_eq!(source_label(&meta), "static");
        assert_eq!(source_label(&CatalogMeta::default()), "unknown source");
    }

    #[test]
    fn shows_counts_and_source() {
        let text = render_text(&test_app());
        assert!(text.contains("Picks: 0"));
        assert!(text.contains("2 available"));
        assert!(text.contains("static"));
        assert!(!text.contains("Pool exhausted"));
    }

    #[test]
    fn shows_status_message_and_exhaustion() {
        let mut app = test_app();
        app.engine.draft_player(PlayerId(1));
        app.engine.draft_player(PlayerId(2));
        app.view.status_message = Some("Drafted B".into());
        let text = render_text(&app);
        assert!(text.contains("Picks: 2"));
        assert!(text.contains("Pool exhausted"));
        assert!(text.contains("Drafted B"));
    }
}
