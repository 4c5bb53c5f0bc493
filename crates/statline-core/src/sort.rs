// Column sorting for raw and aggregated rows.
//
// Text columns sort ascending, numeric columns descending so leaders end up
// on top. Missing values count as the smallest value of their kind: missing
// text comes first, missing numbers come last.

use std::cmp::Ordering;

use crate::aggregate::AggregatedPlayer;
use crate::record::PlayerGameRecord;

/// Every sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    LastName,
    FirstName,
    Team,
    Year,
    Games,
    AtBats,
    Runs,
    Hits,
    Rbis,
    Doubles,
    Triples,
    Average,
}

/// Whether a field compares as text or as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

impl SortField {
    /// Selector order.
    pub const ALL: [SortField; 12] = [
        SortField::LastName,
        SortField::FirstName,
        SortField::Team,
        SortField::Year,
        SortField::Games,
        SortField::AtBats,
        SortField::Runs,
        SortField::Hits,
        SortField::Rbis,
        SortField::Doubles,
        SortField::Triples,
        SortField::Average,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            SortField::LastName | SortField::FirstName | SortField::Team => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    /// Sheet header label for the field.
    pub fn column_name(self) -> &'static str {
        match self {
            SortField::LastName => "LAST NAME",
            SortField::FirstName => "FIRST NAME",
            SortField::Team => "TEAM",
            SortField::Year => "YEAR",
            SortField::Games => "G",
            SortField::AtBats => "ABs",
            SortField::Runs => "Runs",
            SortField::Hits => "Hits",
            SortField::Rbis => "RBIs",
            SortField::Doubles => "2B",
            SortField::Triples => "3B",
            SortField::Average => "AVG",
        }
    }

    /// Inverse of `column_name`. `AVG.` is accepted for `AVG`.
    pub fn from_column_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "AVG." {
            return Some(SortField::Average);
        }
        SortField::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Next field in selector order, wrapping.
    pub fn next(self) -> Self {
        let i = SortField::ALL.iter().position(|f| *f == self).unwrap_or(0);
        SortField::ALL[(i + 1) % SortField::ALL.len()]
    }

    /// Previous field in selector order, wrapping.
    pub fn prev(self) -> Self {
        let len = SortField::ALL.len();
        let i = SortField::ALL.iter().position(|f| *f == self).unwrap_or(0);
        SortField::ALL[(i + len - 1) % len]
    }
}

/// A single cell value as the sorter sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

/// Anything the sort engine can order.
pub trait StatRow {
    fn field_value(&self, field: SortField) -> FieldValue<'_>;
}

impl StatRow for PlayerGameRecord {
    fn field_value(&self, field: SortField) -> FieldValue<'_> {
        let count = |v: Option<u32>| FieldValue::Number(v.map(f64::from));
        match field {
            SortField::LastName => FieldValue::Text(self.last_name.as_deref()),
            SortField::FirstName => FieldValue::Text(self.first_name.as_deref()),
            SortField::Team => FieldValue::Text(self.team.as_deref()),
            SortField::Year => FieldValue::Number(self.year.map(f64::from)),
            SortField::Games => FieldValue::Number(Some(1.0)),
            SortField::AtBats => count(self.at_bats),
            SortField::Runs => count(self.runs),
            SortField::Hits => count(self.hits),
            SortField::Rbis => count(self.rbis),
            SortField::Doubles => count(self.doubles),
            SortField::Triples => count(self.triples),
            SortField::Average => FieldValue::Number(self.average.value()),
        }
    }
}

impl StatRow for AggregatedPlayer {
    fn field_value(&self, field: SortField) -> FieldValue<'_> {
        let total = |v: u64| FieldValue::Number(Some(v as f64));
        match field {
            SortField::LastName => FieldValue::Text(self.last_name.as_deref()),
            SortField::FirstName => FieldValue::Text(self.first_name.as_deref()),
            SortField::Team => FieldValue::Text(self.team.as_deref()),
            SortField::Year => FieldValue::Number(self.year.map(f64::from)),
            SortField::Games => FieldValue::Number(Some(f64::from(self.games))),
            SortField::AtBats => total(self.totals.at_bats),
            SortField::Runs => total(self.totals.runs),
            SortField::Hits => total(self.totals.hits),
            SortField::Rbis => total(self.totals.rbis),
            SortField::Doubles => total(self.totals.doubles),
            SortField::Triples => total(self.totals.triples),
            SortField::Average => FieldValue::Number(Some(self.average)),
        }
    }
}

/// Display order of two values of the same field.
fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        // `None < Some(_)` puts missing text first.
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(&y),
        // Descending; missing is the minimum so it lands last.
        (FieldValue::Number(x), FieldValue::Number(y)) => match (x, y) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        // A field never mixes kinds.
        _ => Ordering::Equal,
    }
}

/// Sorted copy of `records`. Stable: ties keep their input order.
pub fn sort_records<R: StatRow + Clone>(records: &[R], field: SortField) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_values(a.field_value(field), b.field_value(field)));
    sorted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
