// Team/year narrowing of game rows, and the option lists the selectors offer.

use std::collections::BTreeSet;

use crate::record::PlayerGameRecord;

/// Year selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// No year selected: every row passes.
    #[default]
    Any,
    Exact(i32),
    /// A selection string that is not an integer. Matches nothing.
    Unparseable,
}

impl YearFilter {
    /// Parse a selector value. Empty or whitespace means "all years".
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return YearFilter::Any;
        }
        match text.parse::<i32>() {
            Ok(y) => YearFilter::Exact(y),
            Err(_) => YearFilter::Unparseable,
        }
    }

    fn matches(&self, year: Option<i32>) -> bool {
        match self {
            YearFilter::Any => true,
            YearFilter::Exact(y) => year == Some(*y),
            YearFilter::Unparseable => false,
        }
    }
}

/// Active team/year selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact, case-sensitive team name. `None` or empty keeps every team.
    pub team: Option<String>,
    pub year: YearFilter,
}

impl FilterSpec {
    pub fn matches(&self, record: &PlayerGameRecord) -> bool {
        if let Some(team) = self.team.as_deref().filter(|t| !t.is_empty()) {
            if record.team.as_deref() != Some(team) {
                return false;
            }
        }
        self.year.matches(record.year)
    }
}

/// Rows passing both the team and the year filter, in input order.
pub fn filter_records(records: &[PlayerGameRecord], spec: &FilterSpec) -> Vec<PlayerGameRecord> {
    records.iter().filter(|r| spec.matches(r)).cloned().collect()
}

/// Distinct values offered by the team and year selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Ascending.
    pub teams: Vec<String>,
    /// Ascending.
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn from_records(records: &[PlayerGameRecord]) -> Self {
        let teams: BTreeSet<&str> = records.iter().filter_map(|r| r.team.as_deref()).collect();
        let years: BTreeSet<i32> = records.iter().filter_map(|r| r.year).collect();
        FilterOptions {
            teams: teams.into_iter().map(str::to_string).collect(),
            years: years.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
