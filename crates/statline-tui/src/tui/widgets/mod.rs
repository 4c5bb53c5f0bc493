// TUI widget modules, one per screen zone.

pub mod filter_bar;
pub mod quit_confirm;
pub mod stats_table;
pub mod status_bar;
