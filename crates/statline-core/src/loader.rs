// Game-stats CSV loading.
//
// Reads the per-game stats sheet (one row per player per game) with the
// literal header labels LAST NAME, FIRST NAME, TEAM, YEAR, ABs, Runs, Hits,
// RBIs, 2B, 3B, AVG. Headers and cells are trimmed by the reader. Cells are
// loaded leniently: anything that does not parse becomes a missing value and
// is logged, never an error.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::record::{AverageCell, PlayerGameRecord};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} has no LAST NAME or FIRST NAME column")]
    MissingColumns { path: String },

    #[error("loader task for {path} did not complete: {message}")]
    Task { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One sheet row with every cell kept as text. The typed conversion happens
/// in `into_record` so a bad cell never takes the whole row down. Columns not
/// named here are ignored by serde.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    #[serde(rename = "LAST NAME", default)]
    last_name: Option<String>,
    #[serde(rename = "FIRST NAME", default)]
    first_name: Option<String>,
    #[serde(rename = "TEAM", default)]
    team: Option<String>,
    #[serde(rename = "YEAR", default)]
    year: Option<String>,
    #[serde(rename = "ABs", default)]
    at_bats: Option<String>,
    #[serde(rename = "Runs", default)]
    runs: Option<String>,
    #[serde(rename = "Hits", default)]
    hits: Option<String>,
    #[serde(rename = "RBIs", default)]
    rbis: Option<String>,
    #[serde(rename = "2B", default)]
    doubles: Option<String>,
    #[serde(rename = "3B", default)]
    triples: Option<String>,
    #[serde(rename = "AVG", alias = "AVG.", default)]
    average: Option<String>,
}

impl RawGameRow {
    fn into_record(self, row: u64) -> PlayerGameRecord {
        let player = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or("?"),
            self.last_name.as_deref().unwrap_or("?")
        );
        PlayerGameRecord {
            last_name: text_cell(self.last_name),
            first_name: text_cell(self.first_name),
            team: text_cell(self.team),
            year: year_cell(self.year.as_deref(), row, &player),
            at_bats: count_cell(self.at_bats.as_deref(), "ABs", row, &player),
            runs: count_cell(self.runs.as_deref(), "Runs", row, &player),
            hits: count_cell(self.hits.as_deref(), "Hits", row, &player),
            rbis: count_cell(self.rbis.as_deref(), "RBIs", row, &player),
            doubles: count_cell(self.doubles.as_deref(), "2B", row, &player),
            triples: count_cell(self.triples.as_deref(), "3B", row, &player),
            average: AverageCell::parse(self.average.as_deref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

fn text_cell(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Parse a counting stat. Integers and floats are accepted (floats round);
/// negative, non-finite and non-numeric text load as missing.
fn count_cell(raw: Option<&str>, column: &str, row: u64, player: &str) -> Option<u32> {
    let text = raw.filter(|s| !s.is_empty())?;
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    match text.parse::<f64>() {
        Ok(v) if (0.0..=f64::from(u32::MAX)).contains(&v) => Some(v.round() as u32),
        _ => {
            warn!("row {row}: {column} for '{player}' is not a count ({text:?}), treating as missing");
            None
        }
    }
}

/// Parse a year. Integral float text such as `2024.0` is accepted.
fn year_cell(raw: Option<&str>, row: u64, player: &str) -> Option<i32> {
    let text = raw.filter(|s| !s.is_empty())?;
    if let Ok(y) = text.parse::<i32>() {
        return Some(y);
    }
    match text.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v) => {
            Some(v as i32)
        }
        _ => {
            warn!("row {row}: YEAR for '{player}' is not an integer ({text:?}), treating as missing");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

/// Load game rows from any reader. Rows that fail CSV decoding and rows with
/// neither name are skipped with a warning.
pub fn load_records_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerGameRecord>, LoadError> {
    load_from_reader(rdr, "<reader>")
}

fn load_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<PlayerGameRecord>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader.headers().map_err(csv_err)?;
    let has_name_column = headers
        .iter()
        .any(|h| matches!(h, "LAST NAME" | "FIRST NAME"));
    if !has_name_column {
        return Err(LoadError::MissingColumns {
            path: path.to_string(),
        });
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawGameRow>().enumerate() {
        // Data rows are numbered from 1, header excluded.
        let row = idx as u64 + 1;
        match result {
            Ok(raw) => {
                let record = raw.into_record(row);
                if record.last_name.is_none() && record.first_name.is_none() {
                    warn!("row {row}: skipping row with no player name");
                    continue;
                }
                records.push(record);
            }
            Err(e) => {
                warn!("row {row}: skipping malformed game row: {}", e);
            }
        }
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Path-based loader
// ---------------------------------------------------------------------------

/// Load game rows from a CSV file on disk.
pub fn load_records(path: &Path) -> Result<Vec<PlayerGameRecord>, LoadError> {
    let label = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: label.clone(),
        source: e,
    })?;
    load_from_reader(file, &label)
}

// ---------------------------------------------------------------------------
// Async source seam
// ---------------------------------------------------------------------------

/// Where the startup load gets its rows from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<Vec<PlayerGameRecord>, LoadError>;
}

/// A CSV file on local disk, parsed off the async runtime.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSource { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn load(&self) -> Result<Vec<PlayerGameRecord>, LoadError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_records(&path))
            .await
            .map_err(|e| LoadError::Task {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
