// Messages between the terminal front end and the app state.

/// An action requested from the keyboard that changes what the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    NextTeam,
    PrevTeam,
    NextYear,
    PrevYear,
    NextSort,
    PrevSort,
    NextTerm,
    LoadMore,
    ClearFilters,
    Quit,
}

/// Outcome of the startup load, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { path: String, rows: usize },
    Failed { path: String, message: String },
}
