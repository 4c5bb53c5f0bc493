// Per-game stat rows as they come out of the CSV file.
//
// Counting stats stay `Option` here: an empty cell is "missing", not zero.
// Only the aggregator's fold step turns missing into 0.

/// Spreadsheet sentinel written into the AVG column when AB is zero.
pub const DIVISION_ERROR_SENTINEL: &str = "#DIV/0!";

/// Raw content of the AVG column for one game row.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AverageCell {
    /// Empty or whitespace-only cell.
    #[default]
    Missing,
    /// A finite decimal value (e.g. `0.333`).
    Value(f64),
    /// The `#DIV/0!` sentinel.
    DivisionError,
    /// Anything else that failed to parse as a number.
    Malformed(String),
}

impl AverageCell {
    /// Classify a raw cell. Never fails: unparseable text becomes `Malformed`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim) else {
            return AverageCell::Missing;
        };
        if text.is_empty() {
            return AverageCell::Missing;
        }
        if text.eq_ignore_ascii_case(DIVISION_ERROR_SENTINEL) {
            return AverageCell::DivisionError;
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => AverageCell::Value(v),
            _ => AverageCell::Malformed(text.to_string()),
        }
    }

    /// The numeric value, if the cell holds one.
    pub fn value(&self) -> Option<f64> {
        match self {
            AverageCell::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// One player's line for one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerGameRecord {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub team: Option<String>,
    pub year: Option<i32>,
    pub at_bats: Option<u32>,
    pub runs: Option<u32>,
    pub hits: Option<u32>,
    pub rbis: Option<u32>,
    pub doubles: Option<u32>,
    pub triples: Option<u32>,
    pub average: AverageCell,
}

impl PlayerGameRecord {
    /// Start a record for the named player. Everything else is missing.
    pub fn new(last_name: &str, first_name: &str) -> Self {
        PlayerGameRecord {
            last_name: Some(last_name.to_string()),
            first_name: Some(first_name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set at-bats and hits together, the pair most tests care about.
    pub fn with_line(mut self, at_bats: u32, hits: u32) -> Self {
        self.at_bats = Some(at_bats);
        self.hits = Some(hits);
        self
    }

    /// Counting stats in fold order, with missing values normalized to 0.
    pub fn counting_stats(&self) -> CountingStats {
        CountingStats {
            at_bats: u64::from(self.at_bats.unwrap_or(0)),
            runs: u64::from(self.runs.unwrap_or(0)),
            hits: u64::from(self.hits.unwrap_or(0)),
            rbis: u64::from(self.rbis.unwrap_or(0)),
            doubles: u64::from(self.doubles.unwrap_or(0)),
            triples: u64::from(self.triples.unwrap_or(0)),
        }
    }
}

/// Summable counting stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingStats {
    pub at_bats: u64,
    pub runs: u64,
    pub hits: u64,
    pub rbis: u64,
    pub doubles: u64,
    pub triples: u64,
}

impl std::ops::AddAssign for CountingStats {
    fn add_assign(&mut self, rhs: Self) {
        self.at_bats += rhs.at_bats;
        self.runs += rhs.runs;
        self.hits += rhs.hits;
        self.rbis += rhs.rbis;
        self.doubles += rhs.doubles;
        self.triples += rhs.triples;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
