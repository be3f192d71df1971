use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, Weekday};

use crate::model::Match;

/// Other local clubs' matches for the current weekend, split the way the
/// slide shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubColumns {
    pub other_days: Vec<Match>,
    pub sunday: Vec<Match>,
}

impl ClubColumns {
    pub fn is_empty(&self) -> bool {
        self.other_days.is_empty() && self.sunday.is_empty()
    }
}

/// First day of the "last Saturday through today" window.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    let back = match today.weekday() {
        Weekday::Sun => 1,
        Weekday::Sat => 6,
        other => i64::from(other.num_days_from_monday()) + 2,
    };
    today - ChronoDuration::days(back)
}

/// Keep dated matches inside `[window_start(today), today]`, chronological,
/// then split Sunday from every other weekday.
pub fn weekend_columns(matches: &[Match], today: NaiveDate) -> ClubColumns {
    let start = window_start(today);
    let mut in_window: Vec<&Match> = matches
        .iter()
        .filter(|m| m.day().is_some_and(|d| d >= start && d <= today))
        .collect();
    in_window.sort_by_key(|m| m.date);

    let mut columns = ClubColumns::default();
    for m in in_window {
        if m.day().is_some_and(|d| d.weekday() == Weekday::Sun) {
            columns.sunday.push(m.clone());
        } else {
            columns.other_days.push(m.clone());
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_start_per_weekday() {
        // 2025-09-13 is a Saturday.
        assert_eq!(window_start(day(2025, 9, 14)), day(2025, 9, 13));
        assert_eq!(window_start(day(2025, 9, 13)), day(2025, 9, 7));
        assert_eq!(window_start(day(2025, 9, 15)), day(2025, 9, 13));
        assert_eq!(window_start(day(2025, 9, 19)), day(2025, 9, 13));
    }
}
