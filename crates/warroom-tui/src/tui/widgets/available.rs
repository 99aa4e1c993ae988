// Available players widget: undrafted players in catalog order.
//
// Columns: ECR, Name (with a stack badge), Pos (positional rank, "WR12"),
// Team, Bye (with a projected-overlap dot), Tier. The dot shows what the
// roster's count for that bye week would become if the player were drafted
// now.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use warroom_core::player::PlayerRecord;

use super::bye_weeks::conflict_span;
use crate::app::App;

/// Badge after a name that would complete a QB/pass-catcher stack.
pub const STACK_BADGE: &str = "STACK";

/// Render the available players table into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let players = app.engine.list_available();

    let header = Row::new(vec![
        Cell::from("ECR"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Team"),
        Cell::from("Bye"),
        Cell::from("Tier"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = players
        .iter()
        .map(|p| {
            let projected = app.engine.bye_count_if_drafted(p.id).unwrap_or(0);
            let mut name = vec![Span::raw(p.name.clone())];
            if app.engine.stacks_with_roster(p.id) {
                name.push(Span::raw(" "));
                name.push(Span::styled(
                    STACK_BADGE,
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let position = app
                .engine
                .position_label(p.id)
                .unwrap_or_else(|| p.position.code().to_string());
            Row::new(vec![
                Cell::from(format_rank(p)),
                Cell::from(Line::from(name)),
                Cell::from(position),
                Cell::from(p.team.clone()),
                Cell::from(Line::from(vec![
                    Span::raw(format_bye(p.bye_week)),
                    Span::raw(" "),
                    conflict_span(projected),
                ])),
                Cell::from(p.tier.map(|t| t.to_string()).unwrap_or_else(|| "-".into())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(4),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Available Players ({})", players.len())),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if !players.is_empty() {
        table_state.select(Some(app.view.selected.min(players.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Consensus rank as shown in the first column, "-" when unranked.
pub fn format_rank(p: &PlayerRecord) -> String {
    match p.ecr {
        Some(ecr) if ecr.fract() == 0.0 => format!("{}", ecr as i64),
        Some(ecr) => format!("{:.1}", ecr),
        None => "-".to_string(),
    }
}

pub fn format_bye(bye: Option<u8>) -> String {
    bye.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string())
}
