// Display formatting: batting averages and typed table rows.
//
// Rows are built as structured cells rather than markup strings. Cell text is
// stripped of control characters so a field value cannot smuggle terminal
// escape sequences into the rendered table.

use crate::aggregate::AggregatedPlayer;
use crate::pipeline::Term;
use crate::record::{AverageCell, PlayerGameRecord};
use crate::sort::SortField;

/// Placeholder for a missing cell.
pub const MISSING: &str = "N/A";

/// Three decimals, always. Non-finite and negative input render as zero.
pub fn format_average(avg: f64) -> String {
    if !avg.is_finite() || avg <= 0.0 {
        return "0.000".to_string();
    }
    format!("{avg:.3}")
}

/// A recorded AVG cell. Missing, malformed and `#DIV/0!` cells show as zero.
pub fn format_average_cell(cell: &AverageCell) -> String {
    match cell {
        AverageCell::Value(v) => format_average(*v),
        AverageCell::Missing | AverageCell::DivisionError | AverageCell::Malformed(_) => {
            format_average(0.0)
        }
    }
}

/// Remove control characters (ESC, CR, tabs, ...) from a field value.
pub fn sanitize_cell(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl Column {
    /// The sort field behind the column, so headers share labels with the
    /// sort selector.
    pub fn sort_field(self) -> SortField {
        match self {
            Column::LastName => SortField::LastName,
            Column::FirstName => SortField::FirstName,
            Column::Team => SortField::Team,
            Column::Year => SortField::Year,
            Column::Games => SortField::Games,
            Column::AtBats => SortField::AtBats,
            Column::Runs => SortField::Runs,
            Column::Hits => SortField::Hits,
            Column::Rbis => SortField::Rbis,
            Column::Doubles => SortField::Doubles,
            Column::Triples => SortField::Triples,
            Column::Average => SortField::Average,
        }
    }

    pub fn header(self) -> &'static str {
        self.sort_field().column_name()
    }

    pub fn align(self) -> Align {
        match self {
            Column::LastName | Column::FirstName | Column::Team => Align::Left,
            _ => Align::Right,
        }
    }
}

const GAME_COLUMNS: &[Column] = &[
    Column::LastName,
    Column::FirstName,
    Column::Team,
    Column::Year,
    Column::AtBats,
    Column::Runs,
    Column::Hits,
    Column::Rbis,
    Column::Doubles,
    Column::Triples,
    Column::Average,
];

const CAREER_COLUMNS: &[Column] = &[
    Column::LastName,
    Column::FirstName,
    Column::Team,
    Column::Games,
    Column::AtBats,
    Column::Runs,
    Column::Hits,
    Column::Rbis,
    Column::Doubles,
    Column::Triples,
    Column::Average,
];

const SEASON_COLUMNS: &[Column] = &[
    Column::LastName,
    Column::FirstName,
    Column::Year,
    Column::Team,
    Column::Games,
    Column::AtBats,
    Column::Runs,
    Column::Hits,
    Column::Rbis,
    Column::Doubles,
    Column::Triples,
    Column::Average,
];

/// Columns shown for a term.
pub fn columns_for(term: Term) -> &'static [Column] {
    match term {
        Term::Game => GAME_COLUMNS,
        Term::Career => CAREER_COLUMNS,
        Term::Season => SEASON_COLUMNS,
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub column: Column,
    pub text: String,
    pub align: Align,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: Vec<DisplayCell>,
}

impl DisplayRow {
    /// Text of the cell for `column`, if the row has that column.
    pub fn text(&self, column: Column) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.text.as_str())
    }
}

/// Anything that can be projected into a table row.
pub trait ToDisplayRow {
    fn cell_text(&self, column: Column) -> String;

    fn to_display_row(&self, columns: &[Column]) -> DisplayRow {
        DisplayRow {
            cells: columns
                .iter()
                .map(|&column| DisplayCell {
                    column,
                    text: sanitize_cell(&self.cell_text(column)),
                    align: column.align(),
                })
                .collect(),
        }
    }
}

fn text_or_missing(v: Option<&str>) -> String {
    v.unwrap_or(MISSING).to_string()
}

fn number_or_missing<T: ToString>(v: Option<T>) -> String {
    v.map_or_else(|| MISSING.to_string(), |n| n.to_string())
}

impl ToDisplayRow for PlayerGameRecord {
    fn cell_text(&self, column: Column) -> String {
        match column {
            Column::LastName => text_or_missing(self.last_name.as_deref()),
            Column::FirstName => text_or_missing(self.first_name.as_deref()),
            Column::Team => text_or_missing(self.team.as_deref()),
            Column::Year => number_or_missing(self.year),
            Column::Games => "1".to_string(),
            Column::AtBats => number_or_missing(self.at_bats),
            Column::Runs => number_or_missing(self.runs),
            Column::Hits => number_or_missing(self.hits),
            Column::Rbis => number_or_missing(self.rbis),
            Column::Doubles => number_or_missing(self.doubles),
            Column::Triples => number_or_missing(self.triples),
            Column::Average => format_average_cell(&self.average),
        }
    }
}

impl ToDisplayRow for AggregatedPlayer {
    fn cell_text(&self, column: Column) -> String {
        match column {
            Column::LastName => text_or_missing(self.last_name.as_deref()),
            Column::FirstName => text_or_missing(self.first_name.as_deref()),
            Column::Team => text_or_missing(self.team.as_deref()),
            Column::Year => number_or_missing(self.year),
            Column::Games => self.games.to_string(),
            Column::AtBats => self.totals.at_bats.to_string(),
            Column::Runs => self.totals.runs.to_string(),
            Column::Hits => self.totals.hits.to_string(),
            Column::Rbis => self.totals.rbis.to_string(),
            Column::Doubles => self.totals.doubles.to_string(),
            Column::Triples => self.totals.triples.to_string(),
            Column::Average => format_average(self.average),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, AggregationMode};

    #[test]
    fn average_always_three_decimals() {
        assert_eq!(format_average(3.0 / 7.0), "0.429");
        assert_eq!(format_average(0.25), "0.250");
        assert_eq!(format_average(1.0), "1.000");
        assert_eq!(format_average(0.0), "0.000");
    }

    #[test]
    fn average_non_finite_is_zero() {
        assert_eq!(format_average(f64::NAN), "0.000");
        assert_eq!(format_average(f64::INFINITY), "0.000");
    }

    #[test]
    fn average_cells_without_value_show_zero() {
        assert_eq!(format_average_cell(&AverageCell::Missing), "0.000");
        assert_eq!(format_average_cell(&AverageCell::DivisionError), "0.000");
        assert_eq!(format_average_cell(&AverageCell::parse(Some("   "))), "0.000");
        assert_eq!(
            format_average_cell(&AverageCell::Malformed("abc".into())),
            "0.000"
        );
        assert_eq!(format_average_cell(&AverageCell::Value(0.3333)), "0.333");
    }

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_cell("Doe\u{1b}[31m"), "Doe[31m");
        assert_eq!(sanitize_cell("a\tb\r\n"), "ab");
        assert_eq!(sanitize_cell("<b>Doe</b>"), "<b>Doe</b>");
    }

    #[test]
    fn game_row_uses_placeholders_for_missing() {
        let mut rec = PlayerGameRecord::new("Doe", "Jane").with_line(3, 1);
        rec.average = AverageCell::DivisionError;
        let row = rec.to_display_row(columns_for(Term::Game));
        assert_eq!(row.text(Column::LastName), Some("Doe"));
        assert_eq!(row.text(Column::Team), Some(MISSING));
        assert_eq!(row.text(Column::Year), Some(MISSING));
        assert_eq!(row.text(Column::AtBats), Some("3"));
        assert_eq!(row.text(Column::Runs), Some(MISSING));
        assert_eq!(row.text(Column::Average), Some("0.000"));
        assert_eq!(row.text(Column::Games), None);
    }

    #[test]
    fn aggregated_row_cells() {
        let recs = vec![
            PlayerGameRecord::new("Doe", "Jane").with_team("A").with_line(3, 1),
            PlayerGameRecord::new("Doe", "Jane").with_team("A").with_line(4, 2),
        ];
        let agg = aggregate(&recs, AggregationMode::Career);
        let row = agg[0].to_display_row(columns_for(Term::Career));
        assert_eq!(row.text(Column::Games), Some("2"));
        assert_eq!(row.text(Column::AtBats), Some("7"));
        assert_eq!(row.text(Column::Hits), Some("3"));
        assert_eq!(row.text(Column::Runs), Some("0"));
        assert_eq!(row.text(Column::Average), Some("0.429"));
        assert_eq!(row.text(Column::Year), None);
    }

    #[test]
    fn cells_follow_column_order_and_alignment() {
        let row = PlayerGameRecord::new("Doe", "Jane").to_display_row(columns_for(Term::Season));
        let cols: Vec<Column> = row.cells.iter().map(|c| c.column).collect();
        assert_eq!(cols, SEASON_COLUMNS);
        assert_eq!(row.cells[0].align, Align::Left);
        assert_eq!(row.cells[2].align, Align::Right);
    }

    #[test]
    fn headers_match_sheet_labels() {
        assert_eq!(Column::AtBats.header(), "ABs");
        assert_eq!(Column::Doubles.header(), "2B");
        assert_eq!(Column::Average.header(), "AVG");
    }
}
