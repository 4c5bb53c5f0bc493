// Integration tests for the stats pipeline.
//
// These load the fixture sheet through the public loader and check the
// aggregation, filtering and sorting properties end to end.

use std::collections::HashMap;
use std::path::Path;

use statline_core::aggregate::{aggregate, AggregationMode};
use statline_core::filter::{filter_records, FilterSpec, YearFilter};
use statline_core::format::{format_average, Column};
use statline_core::loader::{load_records, CsvFileSource, RecordSource};
use statline_core::page::Pager;
use statline_core::pipeline::{StatsSession, Term, ViewQuery};
use statline_core::record::{CountingStats, PlayerGameRecord};
use statline_core::sort::{sort_records, SortField};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture path (relative to the crate root, which is the cwd for `cargo test`).
const FIXTURE: &str = "tests/fixtures/game_stats.csv";

fn fixture_records() -> Vec<PlayerGameRecord> {
    load_records(Path::new(FIXTURE)).expect("fixture should load")
}

fn raw_totals(records: &[PlayerGameRecord]) -> CountingStats {
    let mut total = CountingStats::default();
    for r in records {
        total += r.counting_stats();
    }
    total
}

fn column(view: &statline_core::pipeline::TableView, col: Column) -> Vec<String> {
    view.rows
        .iter()
        .map(|r| r.text(col).unwrap_or_default().to_string())
        .collect()
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_loads_and_skips_nameless_row() {
    let records = fixture_records();
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| r.last_name.is_some()));
}

#[tokio::test]
async fn async_source_matches_sync_loader() {
    let source = CsvFileSource::new(FIXTURE);
    let loaded = source.load().await.expect("async load");
    assert_eq!(loaded, fixture_records());
}

// ===========================================================================
// Aggregation properties
// ===========================================================================

#[test]
fn career_aggregation_preserves_every_counting_stat() {
    let records = fixture_records();
    let expected = raw_totals(&records);

    let mut summed = CountingStats::default();
    for p in aggregate(&records, AggregationMode::Career) {
        summed += p.totals;
    }
    assert_eq!(summed, expected);
    assert_eq!(expected.at_bats, 25);
    assert_eq!(expected.hits, 9);
    assert_eq!(expected.runs, 6);
    assert_eq!(expected.rbis, 9);
    assert_eq!(expected.doubles, 2);
    assert_eq!(expected.triples, 2);
}

#[test]
fn season_at_bats_sum_to_career_at_bats() {
    let records = fixture_records();

    let mut by_player: HashMap<(Option<String>, Option<String>), u64> = HashMap::new();
    for p in aggregate(&records, AggregationMode::Season) {
        *by_player.entry((p.last_name, p.first_name)).or_default() += p.totals.at_bats;
    }

    let career = aggregate(&records, AggregationMode::Career);
    assert_eq!(career.len(), by_player.len());
    for p in career {
        let season_sum = by_player[&(p.last_name.clone(), p.first_name.clone())];
        assert_eq!(season_sum, p.totals.at_bats, "{:?}", p.last_name);
    }
}

#[test]
fn game_counts_cover_every_row() {
    let records = fixture_records();
    let games: u32 = aggregate(&records, AggregationMode::Season)
        .iter()
        .map(|p| p.games)
        .sum();
    assert_eq!(games as usize, records.len());
}

#[test]
fn averages_come_from_totals() {
    let career = aggregate(&fixture_records(), AggregationMode::Career);
    let avg_of = |last: &str| {
        let p = career
            .iter()
            .find(|p| p.last_name.as_deref() == Some(last))
            .unwrap();
        format_average(p.average)
    };
    assert_eq!(avg_of("Doe"), "0.417");
    assert_eq!(avg_of("Roe"), "0.000");
    assert_eq!(avg_of("Poe"), "0.500");
    assert_eq!(avg_of("Moe"), "0.333");
}

#[test]
fn two_games_collapse_to_one_career_row() {
    let records = vec![
        PlayerGameRecord::new("Doe", "Jane").with_team("A").with_line(3, 1),
        PlayerGameRecord::new("Doe", "Jane").with_team("A").with_line(4, 2),
    ];
    let agg = aggregate(&records, AggregationMode::Career);
    assert_eq!(agg.len(), 1);
    assert_eq!(agg[0].totals.at_bats, 7);
    assert_eq!(agg[0].totals.hits, 3);
    assert_eq!(format_average(agg[0].average), "0.429");
}

// ===========================================================================
// Filter and sort properties
// ===========================================================================

#[test]
fn unmatched_team_yields_nothing() {
    let spec = FilterSpec {
        team: Some("Z".into()),
        year: YearFilter::Any,
    };
    assert!(filter_records(&fixture_records(), &spec).is_empty());
}

#[test]
fn filter_order_does_not_matter() {
    let records = fixture_records();
    let team = FilterSpec {
        team: Some("B".into()),
        year: YearFilter::Any,
    };
    let year = FilterSpec {
        team: None,
        year: YearFilter::Exact(2024),
    };
    let both = FilterSpec {
        team: Some("B".into()),
        year: YearFilter::Exact(2024),
    };
    let a = filter_records(&filter_records(&records, &team), &year);
    let b = filter_records(&filter_records(&records, &year), &team);
    assert_eq!(a, b);
    assert_eq!(a, filter_records(&records, &both));
    assert_eq!(a.len(), 2);
}

#[test]
fn sort_directions_and_idempotence() {
    let career = aggregate(&fixture_records(), AggregationMode::Career);

    let by_name = sort_records(&career, SortField::LastName);
    let names: Vec<_> = by_name.iter().filter_map(|p| p.last_name.as_deref()).collect();
    assert_eq!(names, vec!["Doe", "Moe", "Poe", "Roe"]);

    let by_ab = sort_records(&career, SortField::AtBats);
    let abs: Vec<u64> = by_ab.iter().map(|p| p.totals.at_bats).collect();
    assert_eq!(abs, vec![12, 6, 4, 3]);

    assert_eq!(sort_records(&by_ab, SortField::AtBats), by_ab);
}

// ===========================================================================
// Full session
// ===========================================================================

#[test]
fn session_season_view_for_one_team() {
    let session = StatsSession::new(fixture_records());
    let mut query = ViewQuery::new(SortField::Average, Term::Season);
    query.team = Some("A".into());

    let view = session.run(&query, &Pager::new(25));
    assert_eq!(view.total_rows, 3);
    assert_eq!(column(&view, Column::Year), vec!["2023", "2024", "2024"]);
    assert_eq!(column(&view, Column::Average), vec!["0.429", "0.400", "0.000"]);
    assert_eq!(column(&view, Column::LastName), vec!["Doe", "Doe", "Roe"]);
}

#[test]
fn session_game_view_formats_bad_averages_as_zero() {
    let session = StatsSession::new(fixture_records());
    let mut query = ViewQuery::new(SortField::LastName, Term::Game);
    query.team = Some("B".into());
    query.year = YearFilter::Exact(2024);

    let view = session.run(&query, &Pager::new(25));
    assert_eq!(column(&view, Column::LastName), vec!["Moe", "Poe"]);
    assert_eq!(column(&view, Column::Average), vec!["0.000", "0.000"]);
}

#[test]
fn session_pages_through_results() {
    let session = StatsSession::new(fixture_records());
    let query = ViewQuery::new(SortField::AtBats, Term::Game);
    let mut pager = Pager::new(3);

    let first = session.run(&query, &pager);
    assert_eq!(first.rows.len(), 3);
    assert!(first.has_more);

    pager.load_more();
    pager.load_more();
    let all = session.run(&query, &pager);
    assert_eq!(all.rows.len(), 8);
    assert!(!all.has_more);
    assert_eq!(all.rows[..3], first.rows[..]);
}
