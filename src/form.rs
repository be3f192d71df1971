use serde::Serialize;

use crate::classify::is_played;
use crate::model::Match;
use crate::teams::{is_same_team, is_same_team_ci};

pub const FORM_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormOutcome {
    Win,
    Draw,
    Loss,
    Unplayed,
}

pub type Form = [FormOutcome; FORM_LEN];

/// Last five played results for `team`, oldest first, left-padded with
/// `Unplayed` when the history is shorter.
pub fn compute_form(team: &str, all_matches: &[Match]) -> Form {
    let mut team_matches: Vec<&Match> = all_matches
        .iter()
        .filter(|m| is_same_team(&m.home, team) || is_same_team(&m.away, team))
        .collect();
    // Stable: undated matches keep feed order ahead of dated ones.
    team_matches.sort_by_key(|m| m.date);

    let played: Vec<&Match> = team_matches.into_iter().filter(|m| is_played(m)).collect();
    let recent = &played[played.len().saturating_sub(FORM_LEN)..];

    let mut form = [FormOutcome::Unplayed; FORM_LEN];
    let offset = FORM_LEN - recent.len();
    for (slot, m) in form[offset..].iter_mut().zip(recent) {
        *slot = outcome_for(team, m);
    }
    form
}

fn outcome_for(team: &str, m: &Match) -> FormOutcome {
    // Home side wins when both names match.
    let is_home = is_same_team_ci(&m.home, team);
    let is_away = !is_home && is_same_team_ci(&m.away, team);
    if !is_home && !is_away {
        return FormOutcome::Unplayed;
    }
    let Some((home, away)) = m.goals() else {
        return FormOutcome::Unplayed;
    };
    let (ours, theirs) = if is_home { (home, away) } else { (away, home) };
    match ours.cmp(&theirs) {
        std::cmp::Ordering::Greater => FormOutcome::Win,
        std::cmp::Ordering::Equal => FormOutcome::Draw,
        std::cmp::Ordering::Less => FormOutcome::Loss,
    }
}
