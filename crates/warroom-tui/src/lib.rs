// Library root: the terminal front end, exposed for tests.

pub mod app;
pub mod tui;
