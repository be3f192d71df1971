use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::model::{
    DEFAULT_FEATURED_TEAM, Dataset, FeaturedMatches, Match, PERIOD_COUNT, StandingsRow, TeamMatrix,
};

pub const DATA_PATH: &str = "/api/data";
pub const CLUBS_PATH: &str = "/api/overige-apeldoornse-clubs";

const HOME_FIELDS: &[&str] = &["home", "hometeam", "home_team"];
const AWAY_FIELDS: &[&str] = &["away", "awayteam", "away_team"];
const HOME_GOAL_FIELDS: &[&str] = &["homeGoals", "homescore", "home_goals", "home_score"];
const AWAY_GOAL_FIELDS: &[&str] = &["awayGoals", "awayscore", "away_goals", "away_score"];
const STATUS_FIELDS: &[&str] = &["status", "matchStatus"];
const PERIOD_KEYS: [&str; PERIOD_COUNT] = ["period1", "period2", "period3"];

pub fn fetch_dashboard(base_url: &str) -> Result<Dataset> {
    let client = http_client()?;
    let url = join_url(base_url, DATA_PATH);
    let body = fetch_json_cached(client, &url).context("dashboard request failed")?;
    parse_dashboard_json(&body)
}

pub fn fetch_clubs(base_url: &str) -> Result<Vec<Match>> {
    let client = http_client()?;
    let url = join_url(base_url, CLUBS_PATH);
    let body = fetch_json_cached(client, &url).context("club results request failed")?;
    parse_clubs_json(&body)
}

pub fn read_dashboard_file(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_dashboard_json(&raw)
}

pub fn read_clubs_file(path: &Path) -> Result<Vec<Match>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_clubs_json(&raw)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Parse an `/api/data` body. `null` or an empty body is an empty dataset;
/// anything that is not JSON is an error.
pub fn parse_dashboard_json(raw: &str) -> Result<Dataset> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Dataset::default());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid dashboard json")?;

    let featured_team =
        pick_string(&root, &["featured_team_name"]).unwrap_or_else(|| DEFAULT_FEATURED_TEAM.to_string());

    let raw_data = root.get("raw_data").unwrap_or(&Value::Null);
    let periods = PERIOD_KEYS.map(|key| standings_rows(raw_data.get(key)));

    let featured = root.get("featured_team_matches").unwrap_or(&Value::Null);
    let featured_matches = FeaturedMatches {
        played: matches(featured.get("played")),
        upcoming: matches(featured.get("upcoming")),
    };

    Ok(Dataset {
        featured_team,
        league_table: standings_rows(root.get("league_table")),
        all_matches: matches(root.get("all_matches")),
        periods,
        last_week_results: matches(root.get("last_week_results")),
        next_week_matches: matches(root.get("next_week_matches")),
        featured_matches,
        team_matrix: team_matrix(root.get("team_matrix")),
        last_updated: root.get("last_updated").and_then(as_string),
    })
}

/// Parse the auxiliary-club endpoint: `{ "results": [...] }`.
pub fn parse_clubs_json(raw: &str) -> Result<Vec<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid club results json")?;
    // Some deployments serve the bare array.
    if root.is_array() {
        return Ok(matches(Some(&root)));
    }
    Ok(matches(root.get("results")))
}

pub fn normalize_match(v: &Value) -> Match {
    let time = pick_string(v, &["time"]);
    let date = pick_string(v, &["date"]).and_then(|raw| parse_match_date(&raw, time.as_deref()));
    Match {
        home: pick_string(v, HOME_FIELDS).unwrap_or_default(),
        away: pick_string(v, AWAY_FIELDS).unwrap_or_default(),
        home_goals: first_present(v, HOME_GOAL_FIELDS).and_then(parse_goal),
        away_goals: first_present(v, AWAY_GOAL_FIELDS).and_then(parse_goal),
        status: pick_string(v, STATUS_FIELDS),
        date,
        time,
    }
}

pub fn normalize_standings_row(v: &Value) -> StandingsRow {
    StandingsRow {
        position: pick_u32(v, &["position"]).unwrap_or(0),
        team: pick_string(v, &["team", "name"]).unwrap_or_default(),
        played: pick_u32(v, &["played", "matches"]).unwrap_or(0),
        wins: pick_u32(v, &["wins"]).unwrap_or(0),
        draws: pick_u32(v, &["draws", "ties"]).unwrap_or(0),
        losses: pick_u32(v, &["losses"]).unwrap_or(0),
        goals_for: pick_i64(v, &["goals_for", "goalsFor"]).unwrap_or(0),
        goals_against: pick_i64(v, &["goals_against", "goalsAgainst"]).unwrap_or(0),
        points: pick_i64(v, &["points"]).unwrap_or(0),
    }
}

fn matches(v: Option<&Value>) -> Vec<Match> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter(|item| item.is_object())
                .map(normalize_match)
                .collect()
        })
        .unwrap_or_default()
}

fn standings_rows(v: Option<&Value>) -> Vec<StandingsRow> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter(|item| item.is_object())
                .map(normalize_standings_row)
                .collect()
        })
        .unwrap_or_default()
}

fn team_matrix(v: Option<&Value>) -> TeamMatrix {
    let Some(v) = v else {
        return TeamMatrix::default();
    };
    let teams = v
        .get("teams")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(as_string).collect())
        .unwrap_or_default();
    let mut cells = HashMap::new();
    if let Some(rows) = v.get("matrix").and_then(Value::as_object) {
        for (team, row) in rows {
            let Some(row) = row.as_object() else {
                continue;
            };
            let parsed: HashMap<String, String> = row
                .iter()
                .filter_map(|(opponent, cell)| as_string(cell).map(|c| (opponent.clone(), c)))
                .collect();
            cells.insert(team.clone(), parsed);
        }
    }
    TeamMatrix { teams, cells }
}

/// Parse an ISO-ish date. A date-only value picks up a separate `HH:MM`
/// kickoff when one is given.
pub fn parse_match_date(raw: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.fZ",
    ];

    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt);
        }
    }
    let date = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d").ok()?;
    let kickoff = time
        .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(kickoff))
}

/// Integer parse with `parseInt` leniency: leading whitespace, an optional
/// sign, then as many digits as there are. `"3 (pen)"` is 3, `"x"` is nothing.
pub fn parse_goal(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// First key that is present and not `null`, whatever its shape.
fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(s) = as_string(v) {
                return Some(s);
            }
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    pick_i64(value, keys).and_then(|n| u32::try_from(n).ok())
}

fn pick_i64(value: &Value, keys: &[&str]) -> Option<i64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_i64() {
                return Some(num);
            }
            if let Some(num) = v.as_f64() {
                return Some(num.trunc() as i64);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.trim().parse::<i64>() {
                    return Some(num);
                }
            }
        }
    }
    None
}

fn as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_int_matches_lenient_parse() {
        assert_eq!(leading_int("3"), Some(3));
        assert_eq!(leading_int("  12abc"), Some(12));
        assert_eq!(leading_int("-1"), Some(-1));
        assert_eq!(leading_int("x"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn first_present_goal_wins_even_when_unparseable() {
        let m = normalize_match(&json!({
            "home": "A", "away": "B", "homeGoals": "x", "homescore": 2, "away_score": 1
        }));
        assert_eq!(m.home_goals, None);
        assert_eq!(m.away_goals, Some(1));
    }

    #[test]
    fn null_goal_falls_through_to_next_alias() {
        let m = normalize_match(&json!({"homeGoals": null, "home_goals": "4"}));
        assert_eq!(m.home_goals, Some(4));
    }

    #[test]
    fn empty_status_falls_through_to_match_status() {
        let m = normalize_match(&json!({"status": "", "matchStatus": "Gespeeld"}));
        assert_eq!(m.status.as_deref(), Some("Gespeeld"));
        let m = normalize_match(&json!({"status": " "}));
        assert_eq!(m.status.as_deref(), Some(" "));
    }

    #[test]
    fn date_only_takes_separate_kickoff() {
        let dt = parse_match_date("2025-09-13", Some("14:30")).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-09-13 14:30");
        let dt = parse_match_date("2025-09-13T19:00:00+02:00", None).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "19:00");
        assert!(parse_match_date("13-09-2025", None).is_none());
    }

    #[test]
    fn join_url_strips_trailing_slash() {
        assert_eq!(join_url("http://host:5000/", DATA_PATH), "http://host:5000/api/data");
    }
}
