use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Canonical fixture record. Every upstream alias is resolved once in
/// `payload::normalize_match`; nothing downstream looks at raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    pub home: String,
    pub away: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    // `None` when the upstream status was absent or the empty string.
    pub status: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub time: Option<String>,
}

impl Match {
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.map(|d| d.date())
    }

    pub fn goals(&self) -> Option<(i64, i64)> {
        Some((self.home_goals?, self.away_goals?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsRow {
    pub position: u32,
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: i64,
    pub goals_against: i64,
    pub points: i64,
}

impl StandingsRow {
    pub fn goal_difference(&self) -> i64 {
        self.goals_for - self.goals_against
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturedMatches {
    pub played: Vec<Match>,
    pub upcoming: Vec<Match>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMatrix {
    pub teams: Vec<String>,
    pub cells: HashMap<String, HashMap<String, String>>,
}

impl TeamMatrix {
    pub fn cell(&self, team: &str, opponent: &str) -> Option<&str> {
        self.cells
            .get(team)
            .and_then(|row| row.get(opponent))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

pub const DEFAULT_FEATURED_TEAM: &str = "Featured Team";
pub const PERIOD_COUNT: usize = 3;

/// One `/api/data` payload after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub featured_team: String,
    pub league_table: Vec<StandingsRow>,
    pub all_matches: Vec<Match>,
    pub periods: [Vec<StandingsRow>; PERIOD_COUNT],
    pub last_week_results: Vec<Match>,
    pub next_week_matches: Vec<Match>,
    pub featured_matches: FeaturedMatches,
    pub team_matrix: TeamMatrix,
    pub last_updated: Option<String>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            featured_team: DEFAULT_FEATURED_TEAM.to_string(),
            league_table: Vec::new(),
            all_matches: Vec::new(),
            periods: Default::default(),
            last_week_results: Vec::new(),
            next_week_matches: Vec::new(),
            featured_matches: FeaturedMatches::default(),
            team_matrix: TeamMatrix::default(),
            last_updated: None,
        }
    }
}

/// Everything one refresh produced: the league dataset, the auxiliary club
/// feed, and the local date the fetch ran on (anchors the weekend window).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub dataset: Dataset,
    pub clubs: Vec<Match>,
    pub fetched_on: NaiveDate,
}
