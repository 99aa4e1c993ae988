// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Available Players (60%)  | Sidebar (40%)          |
// |                          | +- Roster (65%) ------+|
// |                          | +- Bye Weeks (35%) ---+|
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: pick counter, pool size, data source, last action.
    pub status_bar: Rect,
    /// Left: the available players table.
    pub available: Rect,
    /// Right sidebar top: my roster in draft order.
    pub roster: Rect,
    /// Right sidebar bottom: bye-week tally.
    pub bye_weeks: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // main + sidebar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(horizontal[1]);

    AppLayout {
        status_bar: vertical[0],
        available: horizontal[0],
        roster: sidebar[0],
        bye_weeks: sidebar[1],
        help_bar: vertical[2],
    }
}
