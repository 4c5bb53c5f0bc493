// Application state: the loaded session, the current selections, and the
// table they produce.
//
// Startup is two-phase: `load_session` awaits the record source once, then
// every `UserCommand` re-runs the synchronous pipeline from the full set.

use tracing::{error, info};

use statline_core::config::DisplayConfig;
use statline_core::filter::YearFilter;
use statline_core::loader::RecordSource;
use statline_core::page::Pager;
use statline_core::pipeline::{StatsSession, TableView, Term, ViewQuery};
use statline_core::sort::SortField;

use crate::protocol::{LoadStatus, UserCommand};

// ---------------------------------------------------------------------------
// Startup load
// ---------------------------------------------------------------------------

/// Load the record set. A failed load is logged and yields an empty session,
/// so the table starts (and stays) empty.
pub async fn load_session(source: &dyn RecordSource, label: &str) -> (StatsSession, LoadStatus) {
    match source.load().await {
        Ok(records) => {
            info!("Loaded {} game rows from {}", records.len(), label);
            let status = LoadStatus::Loaded {
                path: label.to_string(),
                rows: records.len(),
            };
            (StatsSession::new(records), status)
        }
        Err(e) => {
            error!("Error loading game stats: {}", e);
            let status = LoadStatus::Failed {
                path: label.to_string(),
                message: e.to_string(),
            };
            (StatsSession::default(), status)
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    session: StatsSession,
    pub query: ViewQuery,
    pub pager: Pager,
    pub table: TableView,
    pub load_status: LoadStatus,
}

impl AppState {
    pub fn new(session: StatsSession, display: &DisplayConfig, load_status: LoadStatus) -> Self {
        let term = display.default_term;
        let sort = if term.shows(display.default_sort) {
            display.default_sort
        } else {
            step_sort(display.default_sort, term, SortField::next)
        };
        let query = ViewQuery::new(sort, term);
        let pager = Pager::new(display.page_size);
        let table = session.run(&query, &pager);
        AppState {
            session,
            query,
            pager,
            table,
            load_status,
        }
    }

    /// Apply a command and rebuild the table. Any change other than
    /// `LoadMore` starts again from the first page. `Quit` is a no-op here.
    pub fn apply_command(&mut self, cmd: UserCommand) {
        let options = self.session.options();
        match cmd {
            UserCommand::NextTeam | UserCommand::PrevTeam => {
                self.query.team = cycle(
                    self.query.team.as_ref(),
                    &options.teams,
                    cmd == UserCommand::NextTeam,
                );
            }
            UserCommand::NextYear | UserCommand::PrevYear => {
                let current = match self.query.year {
                    YearFilter::Exact(y) => Some(y),
                    YearFilter::Any | YearFilter::Unparseable => None,
                };
                self.query.year = match cycle(
                    current.as_ref(),
                    &options.years,
                    cmd == UserCommand::NextYear,
                ) {
                    Some(y) => YearFilter::Exact(y),
                    None => YearFilter::Any,
                };
            }
            UserCommand::NextSort => {
                self.query.sort = step_sort(self.query.sort, self.query.term, SortField::next);
            }
            UserCommand::PrevSort => {
                self.query.sort = step_sort(self.query.sort, self.query.term, SortField::prev);
            }
            UserCommand::NextTerm => {
                self.query.term = self.query.term.next();
                if !self.query.term.shows(self.query.sort) {
                    self.query.sort = step_sort(self.query.sort, self.query.term, SortField::next);
                }
            }
            UserCommand::ClearFilters => {
                self.query.team = None;
                self.query.year = YearFilter::Any;
            }
            UserCommand::LoadMore => {
                if !self.table.has_more {
                    return;
                }
                self.pager.load_more();
                self.refresh();
                return;
            }
            UserCommand::Quit => return,
        }
        self.pager.reset();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.table = self.session.run(&self.query, &self.pager);
    }
}

/// Step `current` until it lands on a field the term has a column for.
fn step_sort(current: SortField, term: Term, step: fn(SortField) -> SortField) -> SortField {
    let mut field = step(current);
    for _ in 0..SortField::ALL.len() {
        if term.shows(field) {
            return field;
        }
        field = step(field);
    }
    current
}

/// Step through `None -> options[0] -> ... -> options[n-1] -> None`, or the
/// reverse. A current value no longer in `options` restarts the cycle.
fn cycle<T: Clone + PartialEq>(current: Option<&T>, options: &[T], forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let pos = current.and_then(|c| options.iter().position(|o| o == c));
    let next = match (pos, forward) {
        (None, true) => Some(0),
        (None, false) => Some(options.len() - 1),
        (Some(i), true) => (i + 1 < options.len()).then_some(i + 1),
        (Some(i), false) => i.checked_sub(1),
    };
    next.map(|i| options[i].clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
