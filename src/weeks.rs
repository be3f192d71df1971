use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::model::Match;
use crate::teams::involves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOrder {
    /// Past results: newest match first, newest week first.
    MostRecentFirst,
    /// Fixtures: earliest match first, earliest week first.
    EarliestFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub label: String,
    pub matches: Vec<Match>,
}

/// `Week <n> (<year>)` with ISO-8601 numbering; the year is the ISO week-year
/// (the year of that week's Thursday), so 2024-12-30 is `Week 1 (2025)`.
pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("Week {} ({})", iso.week(), iso.year())
}

/// Bucket dated matches by ISO week. Inside a bucket the featured team's
/// matches lead, then date order per `order`. Buckets come back in plain
/// string order of their labels (descending for `MostRecentFirst`), which
/// puts "Week 9" after "Week 10" in ascending order.
pub fn group_by_week(matches: &[Match], featured_team: &str, order: WeekOrder) -> Vec<WeekBucket> {
    let mut buckets: BTreeMap<String, Vec<Match>> = BTreeMap::new();
    for m in matches {
        let Some(day) = m.day() else {
            tracing::debug!(home = %m.home, away = %m.away, "match without date left out of week grouping");
            continue;
        };
        buckets.entry(week_label(day)).or_default().push(m.clone());
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| compare_in_week(a, b, featured_team, order));
    }

    let mut out: Vec<WeekBucket> = buckets
        .into_iter()
        .map(|(label, matches)| WeekBucket { label, matches })
        .collect();
    if order == WeekOrder::MostRecentFirst {
        out.reverse();
    }
    out
}

fn compare_in_week(a: &Match, b: &Match, featured_team: &str, order: WeekOrder) -> Ordering {
    let a_featured = involves(a, featured_team);
    let b_featured = involves(b, featured_team);
    b_featured.cmp(&a_featured).then_with(|| match order {
        WeekOrder::MostRecentFirst => b.date.cmp(&a.date),
        WeekOrder::EarliestFirst => a.date.cmp(&b.date),
    })
}
