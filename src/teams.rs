//! Team name equivalence.
//!
//! Upstream feeds spell clubs inconsistently ("AVV Columbia" vs "Columbia"),
//! so equivalence is substring containment in either direction. A team whose
//! name is contained in an unrelated team's name ("VIOS" / "VIOS V") is
//! reported as the same team; callers accept that.
//!
//! Case handling differs per call site and is kept that way: standings and
//! result highlighting compare case-sensitively, form sides compare
//! lowercased, period tables check one direction lowercased. Unifying them is
//! a behaviour change, not a cleanup.

use crate::model::Match;

/// Case-sensitive bidirectional containment. Empty names never match.
pub fn is_same_team(a: &str, b: &str) -> bool {
    // candidate fix: plain substring containment treats "" as inside every
    // name, so a blank featured team would highlight every row.
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Lowercased bidirectional containment, used for form side resolution.
pub fn is_same_team_ci(a: &str, b: &str) -> bool {
    is_same_team(&a.to_lowercase(), &b.to_lowercase())
}

/// One-directional lowercased check: does `name` mention `team`?
pub fn mentions_team_ci(name: &str, team: &str) -> bool {
    if name.is_empty() || team.is_empty() {
        return false;
    }
    name.to_lowercase().contains(&team.to_lowercase())
}

/// True when either side of `m` is `team` under [`is_same_team`].
pub fn involves(m: &Match, team: &str) -> bool {
    is_same_team(&m.home, team) || is_same_team(&m.away, team)
}
