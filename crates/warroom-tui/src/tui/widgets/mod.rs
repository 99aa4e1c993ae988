// TUI widget modules for each dashboard panel.

pub mod available;
pub mod bye_weeks;
pub mod roster;
pub mod status_bar;
