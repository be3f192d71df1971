use serde_json::json;

use liga_dashboard::model::Match;
use liga_dashboard::payload::normalize_match;
use liga_dashboard::teams::involves;
use liga_dashboard::weeks::{WeekOrder, group_by_week};

const FEATURED: &str = "AVV Columbia";

fn fixture(home: &str, away: &str, date: &str, time: &str) -> Match {
    normalize_match(&json!({
        "home": home, "away": away, "homeGoals": 1, "awayGoals": 0,
        "status": "played", "date": date, "time": time
    }))
}

fn one_week() -> Vec<Match> {
    vec![
        fixture("WSV", "VIOS V", "2025-09-18", "20:00"),
        fixture("Robur et Velocitas", "Brummen", "2025-09-20", "16:00"),
        fixture("AVV Columbia", "Epe", "2025-09-15", "19:30"),
        fixture("Orderbos", "Albatross", "2025-09-21", "11:00"),
    ]
}

#[test]
fn featured_matches_lead_each_bucket() {
    for order in [WeekOrder::MostRecentFirst, WeekOrder::EarliestFirst] {
        let buckets = group_by_week(&one_week(), FEATURED, order);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Week 38 (2025)");
        assert!(involves(&buckets[0].matches[0], FEATURED));
        assert!(buckets[0].matches[1..].iter().all(|m| !involves(m, FEATURED)));
    }
}

#[test]
fn most_recent_first_sorts_descending() {
    let buckets = group_by_week(&one_week(), FEATURED, WeekOrder::MostRecentFirst);
    let others: Vec<&Match> = buckets[0]
        .matches
        .iter()
        .filter(|m| !involves(m, FEATURED))
        .collect();
    assert_eq!(others.len(), 3);
    assert!(others.windows(2).all(|w| w[0].date >= w[1].date));
    assert_eq!(others[0].home, "Orderbos");
}

#[test]
fn earliest_first_sorts_ascending() {
    let buckets = group_by_week(&one_week(), FEATURED, WeekOrder::EarliestFirst);
    let others: Vec<&Match> = buckets[0].matches[1..].iter().collect();
    assert!(others.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(others[0].home, "WSV");
}

#[test]
fn buckets_follow_requested_order() {
    let matches = vec![
        fixture("A", "B", "2025-09-13", "14:30"),
        fixture("C", "D", "2025-09-20", "14:30"),
    ];
    let recent: Vec<String> = group_by_week(&matches, FEATURED, WeekOrder::MostRecentFirst)
        .into_iter()
        .map(|b| b.label)
        .collect();
    assert_eq!(recent, vec!["Week 38 (2025)", "Week 37 (2025)"]);

    let upcoming: Vec<String> = group_by_week(&matches, FEATURED, WeekOrder::EarliestFirst)
        .into_iter()
        .map(|b| b.label)
        .collect();
    assert_eq!(upcoming, vec!["Week 37 (2025)", "Week 38 (2025)"]);
}

#[test]
fn labels_compare_as_plain_strings() {
    // Week 9 and week 10 of 2025: string order puts "Week 10" first.
    let matches = vec![
        fixture("A", "B", "2025-03-01", "14:30"),
        fixture("C", "D", "2025-03-08", "14:30"),
    ];
    let labels: Vec<String> = group_by_week(&matches, FEATURED, WeekOrder::EarliestFirst)
        .into_iter()
        .map(|b| b.label)
        .collect();
    assert_eq!(labels, vec!["Week 10 (2025)", "Week 9 (2025)"]);
}

#[test]
fn undated_matches_are_dropped() {
    let mut matches = one_week();
    matches.push(normalize_match(&json!({"home": "X", "away": "Y", "date": "onbekend"})));
    matches.push(normalize_match(&json!({"home": "X", "away": "Z"})));
    let buckets = group_by_week(&matches, FEATURED, WeekOrder::MostRecentFirst);
    let total: usize = buckets.iter().map(|b| b.matches.len()).sum();
    assert_eq!(total, 4);
}

#[test]
fn year_boundary_uses_iso_week_year() {
    let matches = vec![fixture("A", "B", "2024-12-30", "20:00")];
    let buckets = group_by_week(&matches, FEATURED, WeekOrder::EarliestFirst);
    assert_eq!(buckets[0].label, "Week 1 (2025)");
}
