// Statline terminal front end.

pub mod app;
pub mod protocol;
pub mod tui;
