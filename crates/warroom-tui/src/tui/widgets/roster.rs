// Roster widget: my drafted players in draft order.
//
// "3. Drake London  WR ATL  bye 5 ●" -- the dot reflects how many rostered
// players share that bye week right now.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use super::available::format_bye;
use super::bye_weeks::conflict_span;
use crate::app::App;

/// Render the roster sidebar into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let roster = app.engine.list_roster();
    let title = build_title(app);

    if roster.is_empty() {
        let paragraph = Paragraph::new("  Nobody drafted yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    // Keep the latest picks in view.
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = roster.len();
    let offset = total.saturating_sub(visible_rows);

    let items: Vec<ListItem> = roster
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(i, p)| {
            let count = p
                .bye_week
                .map(|w| app.engine.bye_week_count(w))
                .unwrap_or(0);
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    " {:>2}. {} {} {} bye {} ",
                    i + 1,
                    p.name,
                    p.position,
                    p.team,
                    format_bye(p.bye_week)
                )),
                conflict_span(count),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// "My Roster (4) QB1 RB2 WR1"
fn build_title(app: &App) -> String {
    let mut title = format!("My Roster ({})", app.engine.pick_count());
    for (pos, n) in app.engine.roster_position_counts() {
        title.push_str(&format!(" {}{}", pos, n));
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use warroom_core::catalog::Catalog;
    use warroom_core::draft::DraftEngine;
    use warroom_core::player::{PlayerId, PlayerRecord, Position};

    fn test_app(n: u32) -> App {
        let players = (1..=n)
            .map(|i| {
                PlayerRecord::new(i, format!("Player {}", i), Position::WideReceiver, "SEA", Some(8))
            })
            .collect();
        App::new(DraftEngine::new(Catalog::from_records(players).unwrap()))
    }

    fn render_text(app: &App, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, height)).unwrap();
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
    fn empty_roster_placeholder() {
        let text = render_text(&test_app(2), 6);
        assert!(text.contains("My Roster (0)"));
        assert!(text.contains("Nobody drafted yet."));
    }

    #[test]
    fn shows_picks_in_draft_order_with_position_counts() {
        let mut app = test_app(3);
        app.engine.draft_player(PlayerId(3));
        app.engine.draft_player(PlayerId(1));
        let text = render_text(&app, 8);
        assert!(text.contains("My Roster (2) WR2"));
        let third = text.find("1. Player 3").unwrap();
        let first = text.find("2. Player 1").unwrap();
        assert!(third < first);
        assert!(text.contains("bye 8"));
    }

    #[test]
    fn long_roster_keeps_latest_pick_visible() {
        let mut app = test_app(12);
        for id in 1..=12 {
            app.engine.draft_player(PlayerId(id));
        }
        let text = render_text(&app, 6);
        assert!(text.contains("12. Player 12"));
        assert!(!text.contains(" 1. Player 1 "));
    }
}
