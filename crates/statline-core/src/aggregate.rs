// Per-player aggregation of game rows.
//
// Folds game rows into one `AggregatedPlayer` per key in a single pass, then
// derives the batting average from the final totals.

use std::collections::HashMap;

use tracing::debug;

use crate::record::{AverageCell, CountingStats, PlayerGameRecord};

/// How game rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationMode {
    /// One group per (last name, first name, team), across all years.
    Career,
    /// One group per (last name, first name, year).
    Season,
}

/// Identity of an aggregation group. Missing components take part as `None`,
/// so two rows that both lack a team still share a career group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregationKey {
    Career {
        last: Option<String>,
        first: Option<String>,
        team: Option<String>,
    },
    Season {
        last: Option<String>,
        first: Option<String>,
        year: Option<i32>,
    },
}

impl AggregationKey {
    pub fn for_record(record: &PlayerGameRecord, mode: AggregationMode) -> Self {
        match mode {
            AggregationMode::Career => AggregationKey::Career {
                last: record.last_name.clone(),
                first: record.first_name.clone(),
                team: record.team.clone(),
            },
            AggregationMode::Season => AggregationKey::Season {
                last: record.last_name.clone(),
                first: record.first_name.clone(),
                year: record.year,
            },
        }
    }
}

/// Summed line for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPlayer {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    /// Career: the key's team. Season: team of the first row folded in.
    pub team: Option<String>,
    /// Season only.
    pub year: Option<i32>,
    pub games: u32,
    pub totals: CountingStats,
    /// `hits / at_bats` over the totals, 0.0 when there are no at-bats.
    pub average: f64,
}

impl AggregatedPlayer {
    fn seed(record: &PlayerGameRecord, mode: AggregationMode) -> Self {
        AggregatedPlayer {
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            team: record.team.clone(),
            year: match mode {
                AggregationMode::Career => None,
                AggregationMode::Season => record.year,
            },
            games: 1,
            totals: record.counting_stats(),
            average: 0.0,
        }
    }

    fn fold(&mut self, record: &PlayerGameRecord) {
        self.totals += record.counting_stats();
        self.games += 1;
    }
}

/// Hits over at-bats, 0.0 when `at_bats` is 0.
pub fn batting_average(hits: u64, at_bats: u64) -> f64 {
    if at_bats == 0 {
        0.0
    } else {
        hits as f64 / at_bats as f64
    }
}

/// Group `records` by the key for `mode` and sum their counting stats.
///
/// Output holds one entry per distinct key in first-seen order. Callers that
/// care about order should sort explicitly.
pub fn aggregate(records: &[PlayerGameRecord], mode: AggregationMode) -> Vec<AggregatedPlayer> {
    let mut index: HashMap<AggregationKey, usize> = HashMap::new();
    let mut players: Vec<AggregatedPlayer> = Vec::new();

    for record in records {
        let key = AggregationKey::for_record(record, mode);
        match index.get(&key) {
            Some(&i) => players[i].fold(record),
            None => {
                index.insert(key, players.len());
                players.push(AggregatedPlayer::seed(record, mode));
            }
        }
    }

    for p in &mut players {
        p.average = batting_average(p.totals.hits, p.totals.at_bats);
    }

    debug!(
        "Aggregated {} rows into {} {:?} groups",
        records.len(),
        players.len(),
        mode
    );
    players
}

/// Older averaging rule: the mean of the AVG cells recorded on each row.
///
/// Only cells holding a non-zero number are counted; a group with none of
/// those gets `None`. This does not agree with `aggregate` whenever games have
/// different at-bat counts, and is kept only so the difference stays visible
/// in tests and when comparing against sheets produced by the old page.
pub fn legacy_mean_of_recorded_averages(
    records: &[PlayerGameRecord],
    mode: AggregationMode,
) -> Vec<(AggregationKey, Option<f64>)> {
    let mut index: HashMap<AggregationKey, usize> = HashMap::new();
    let mut sums: Vec<(AggregationKey, f64, u32)> = Vec::new();

    for record in records {
        let key = AggregationKey::for_record(record, mode);
        let counted = match record.average {
            AverageCell::Value(v) if v != 0.0 => Some(v),
            _ => None,
        };
        let i = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key.clone(), sums.len());
                sums.push((key, 0.0, 0));
                sums.len() - 1
            }
        };
        if let Some(v) = counted {
            sums[i].1 += v;
            sums[i].2 += 1;
        }
    }

    sums.into_iter()
        .map(|(key, total, n)| (key, (n > 0).then(|| total / f64::from(n))))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
