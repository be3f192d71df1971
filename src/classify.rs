use serde::Serialize;

use crate::model::Match;

/// Status strings the various upstream feeds use for a finished fixture.
/// Compared exactly: no trimming, no case folding.
pub const PLAYED_TOKENS: [&str; 6] = [
    "played",
    "Gespeeld",
    "Uitgespeeld",
    "Afgelopen",
    "Finished",
    "Final",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchState {
    Played,
    Upcoming,
}

/// A present status decides on its own; only an absent/empty status falls
/// back to "both goal fields hold integers". A whitespace-only status counts
/// as present (and is therefore Upcoming).
pub fn classify(m: &Match) -> MatchState {
    match m.status.as_deref() {
        Some(status) if !status.is_empty() => {
            if PLAYED_TOKENS.contains(&status) {
                MatchState::Played
            } else {
                MatchState::Upcoming
            }
        }
        _ => {
            if m.home_goals.is_some() && m.away_goals.is_some() {
                MatchState::Played
            } else {
                MatchState::Upcoming
            }
        }
    }
}

pub fn is_played(m: &Match) -> bool {
    classify(m) == MatchState::Played
}

/// (played, total) over a match list.
pub fn played_count(matches: &[Match]) -> (usize, usize) {
    let played = matches.iter().filter(|m| is_played(m)).count();
    (played, matches.len())
}
