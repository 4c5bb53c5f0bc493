// Filter -> aggregate -> sort -> page -> rows.
//
// `StatsSession` owns the full record set loaded at startup. Every call to
// `run` re-derives the table from that set; nothing computed for one view
// survives into the next.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::aggregate::{aggregate, AggregationMode};
use crate::filter::{filter_records, FilterOptions, FilterSpec, YearFilter};
use crate::format::{columns_for, Column, DisplayRow, ToDisplayRow};
use crate::page::Pager;
use crate::record::PlayerGameRecord;
use crate::sort::{sort_records, SortField, StatRow};

/// Granularity of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// One row per game, no aggregation.
    Game,
    Career,
    Season,
}

impl Term {
    pub fn aggregation_mode(self) -> Option<AggregationMode> {
        match self {
            Term::Game => None,
            Term::Career => Some(AggregationMode::Career),
            Term::Season => Some(AggregationMode::Season),
        }
    }

    /// Game -> Career -> Season -> Game.
    pub fn next(self) -> Self {
        match self {
            Term::Game => Term::Career,
            Term::Career => Term::Season,
            Term::Season => Term::Game,
        }
    }

    /// Whether the table for this term has a column for `field`.
    pub fn shows(self, field: SortField) -> bool {
        columns_for(self).iter().any(|c| c.sort_field() == field)
    }

    pub fn label(self) -> &'static str {
        match self {
            Term::Game => "game",
            Term::Career => "career",
            Term::Season => "season",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "game" | "games" => Ok(Term::Game),
            "career" => Ok(Term::Career),
            "season" => Ok(Term::Season),
            other => Err(format!("unknown term '{other}'")),
        }
    }
}

/// Everything the user has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub team: Option<String>,
    pub year: YearFilter,
    pub sort: SortField,
    pub term: Term,
}

impl ViewQuery {
    pub fn new(sort: SortField, term: Term) -> Self {
        ViewQuery {
            team: None,
            year: YearFilter::Any,
            sort,
            term,
        }
    }

    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            team: self.team.clone(),
            year: self.year,
        }
    }
}

/// The rendered result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub term: Term,
    pub sort: SortField,
    pub columns: &'static [Column],
    /// Visible rows only.
    pub rows: Vec<DisplayRow>,
    /// Rows the query matched before paging.
    pub total_rows: usize,
    pub has_more: bool,
}

impl TableView {
    /// The table shown before anything is loaded.
    pub fn empty(term: Term, sort: SortField) -> Self {
        TableView {
            term,
            sort,
            columns: columns_for(term),
            rows: Vec::new(),
            total_rows: 0,
            has_more: false,
        }
    }
}

/// The loaded record set and the derived selector options.
#[derive(Debug, Clone, Default)]
pub struct StatsSession {
    records: Vec<PlayerGameRecord>,
    options: FilterOptions,
}

impl StatsSession {
    pub fn new(records: Vec<PlayerGameRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        StatsSession { records, options }
    }

    pub fn records(&self) -> &[PlayerGameRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Run the full pipeline for `query`, showing as many rows as `pager` allows.
    pub fn run(&self, query: &ViewQuery, pager: &Pager) -> TableView {
        let filtered = filter_records(&self.records, &query.filter_spec());
        let columns = columns_for(query.term);

        let view = match query.term.aggregation_mode() {
            None => build_view(&filtered, query, pager, columns),
            Some(mode) => {
                let players = aggregate(&filtered, mode);
                build_view(&players, query, pager, columns)
            }
        };

        debug!(
            "Pipeline: {} rows -> {} filtered -> {} {} rows, showing {}",
            self.records.len(),
            filtered.len(),
            view.total_rows,
            query.term,
            view.rows.len()
        );
        view
    }
}

fn build_view<R>(rows: &[R], query: &ViewQuery, pager: &Pager, columns: &'static [Column]) -> TableView
where
    R: StatRow + ToDisplayRow + Clone,
{
    let sorted = sort_records(rows, query.sort);
    let (visible, has_more) = pager.slice(&sorted);
    TableView {
        term: query.term,
        sort: query.sort,
        columns,
        rows: visible.iter().map(|r| r.to_display_row(columns)).collect(),
        total_rows: sorted.len(),
        has_more,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
