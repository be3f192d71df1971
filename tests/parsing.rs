use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use liga_dashboard::classify::{MatchState, classify};
use liga_dashboard::payload::{parse_clubs_json, parse_dashboard_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_dashboard_fixture() {
    let raw = read_fixture("dashboard.json");
    let data = parse_dashboard_json(&raw).expect("fixture should parse");
    assert_eq!(data.featured_team, "AVV Columbia");
    assert_eq!(data.last_updated.as_deref(), Some("2025-09-20 18:45"));
    assert_eq!(data.league_table.len(), 4);
    assert_eq!(data.all_matches.len(), 8);
    assert_eq!(data.periods[0].len(), 2);
    assert_eq!(data.periods[1].len(), 2);
    assert!(data.periods[2].is_empty());
    assert_eq!(data.last_week_results.len(), 3);
    assert_eq!(data.next_week_matches.len(), 2);
    assert_eq!(data.featured_matches.played.len(), 3);
    assert_eq!(data.featured_matches.upcoming.len(), 1);
}

#[test]
fn match_aliases_are_normalized() {
    let raw = read_fixture("dashboard.json");
    let data = parse_dashboard_json(&raw).expect("fixture should parse");

    let first = &data.all_matches[0];
    let kickoff = NaiveDate::from_ymd_opt(2025, 9, 6)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    assert_eq!(first.date, Some(kickoff));
    assert_eq!(first.goals(), Some((2, 1)));

    // home_score / away_score, no status: played by goals alone.
    let by_goals = &data.all_matches[2];
    assert_eq!(by_goals.goals(), Some((3, 1)));
    assert_eq!(by_goals.status, None);
    assert_eq!(classify(by_goals), MatchState::Played);

    // homescore / awayscore plus matchStatus.
    let alt = &data.all_matches[3];
    assert_eq!(alt.goals(), Some((0, 4)));
    assert_eq!(alt.status.as_deref(), Some("Afgelopen"));

    // String goals.
    assert_eq!(data.all_matches[1].goals(), Some((2, 0)));
}

#[test]
fn standings_rows_compute_goal_difference() {
    let raw = read_fixture("dashboard.json");
    let data = parse_dashboard_json(&raw).expect("fixture should parse");
    let columbia = data
        .league_table
        .iter()
        .find(|r| r.team == "AVV Columbia")
        .expect("featured team row");
    assert_eq!(columbia.position, 1);
    assert_eq!(columbia.points, 7);
    assert_eq!(columbia.goal_difference(), 5);
}

#[test]
fn parses_team_matrix() {
    let raw = read_fixture("dashboard.json");
    let data = parse_dashboard_json(&raw).expect("fixture should parse");
    assert_eq!(data.team_matrix.teams, vec!["AVV Columbia", "VIOS V"]);
    assert_eq!(data.team_matrix.cell("AVV Columbia", "VIOS V"), Some("2-1"));
    assert_eq!(data.team_matrix.cell("VIOS V", "AVV Columbia"), Some("2025-09-27"));
    assert_eq!(data.team_matrix.cell("AVV Columbia", "AVV Columbia"), None);
}

#[test]
fn parses_club_results_fixture() {
    let raw = read_fixture("clubs.json");
    let clubs = parse_clubs_json(&raw).expect("fixture should parse");
    assert_eq!(clubs.len(), 4);
    assert_eq!(clubs[0].home, "CSV Apeldoorn");
    assert_eq!(clubs[0].goals(), Some((2, 2)));
}

#[test]
fn club_results_accept_bare_array() {
    let clubs = parse_clubs_json(r#"[{"home": "A", "away": "B", "date": "2025-09-20"}]"#)
        .expect("array should parse");
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].away, "B");
}

#[test]
fn empty_payloads_are_empty_datasets() {
    let data = parse_dashboard_json("null").expect("null is an empty dataset");
    assert_eq!(data.featured_team, "Featured Team");
    assert!(data.league_table.is_empty());
    assert!(parse_dashboard_json("   ").is_ok());
    assert!(parse_clubs_json("").expect("empty body").is_empty());
}

#[test]
fn rejects_invalid_json() {
    assert!(parse_dashboard_json("<html>502</html>").is_err());
    assert!(parse_clubs_json("{").is_err());
}

#[test]
fn missing_sections_default_to_empty() {
    let data = parse_dashboard_json(r#"{"featured_team_name": "VV Gorecht"}"#)
        .expect("sparse payload should parse");
    assert_eq!(data.featured_team, "VV Gorecht");
    assert!(data.all_matches.is_empty());
    assert!(data.periods.iter().all(Vec::is_empty));
    assert!(data.team_matrix.teams.is_empty());
    assert_eq!(data.last_updated, None);
}
