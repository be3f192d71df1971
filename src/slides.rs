//! Slide assembly: one data snapshot in, the ordered slide list out.
//!
//! Slides are view models only. The renderer decides how a `SlideBody`
//! looks; nothing here knows about terminals.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::{MatchState, classify, is_played, played_count};
use crate::clubs::weekend_columns;
use crate::form::{Form, compute_form};
use crate::model::{Dataset, Match, Snapshot, StandingsRow, TeamMatrix};
use crate::teams::{involves, is_same_team, mentions_team_ci};
use crate::weeks::{WeekOrder, group_by_week};

pub const RECENT_RESULTS_LIMIT: usize = 7;
pub const COLUMN_ROWS: usize = 7;
/// Featured team used by the backend's fixture data set.
pub const TEST_MODE_TEAM: &str = "VV Gorecht";

const NO_RESULTS_TEXT: &str =
    "Data wordt geladen of er zijn nog geen wedstrijden gespeeld dit seizoen";
const NO_FIXTURES_TEXT: &str = "Programma wordt nog bekendgemaakt";
const NO_DATA_TEXT: &str = "Geen gegevens beschikbaar";

/// What the current screen can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayProfile {
    pub two_columns: bool,
    pub form_column: bool,
    pub logos: bool,
    pub team_matrix: bool,
}

impl DisplayProfile {
    pub const fn desktop() -> Self {
        Self {
            two_columns: true,
            form_column: true,
            logos: true,
            team_matrix: true,
        }
    }

    pub const fn tv() -> Self {
        Self::desktop()
    }

    pub const fn mobile() -> Self {
        Self {
            two_columns: false,
            form_column: false,
            logos: false,
            team_matrix: false,
        }
    }

    /// Pick a preset from the terminal size in cells.
    pub fn for_viewport(width: u16, height: u16) -> Self {
        if width < 100 {
            Self::mobile()
        } else if width >= 160 && height >= 45 {
            Self::tv()
        } else {
            Self::desktop()
        }
    }
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub profile: DisplayProfile,
    /// Show period tables even before any team in them has played.
    pub force_periods: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlideKind {
    Intro,
    Standings,
    Period(u8),
    RecentResults,
    ClubResults,
    Upcoming,
    FeaturedFixtures,
    TeamMatrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub kind: SlideKind,
    pub title: String,
    pub body: SlideBody,
}

impl Slide {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, SlideBody::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SlideBody {
    Intro(IntroSlide),
    Table(TableColumns),
    Weeks(Vec<WeekBlock>),
    Clubs {
        other_days: Vec<MatchLine>,
        sunday: Vec<MatchLine>,
    },
    Featured(FeaturedFixtures),
    Matrix(MatrixGrid),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntroSlide {
    pub team: String,
    pub competition_played: usize,
    pub competition_total: usize,
    pub featured_played: usize,
    pub featured_upcoming: usize,
    pub test_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsLine {
    pub position: u32,
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i64,
    pub points: i64,
    pub form: Option<Form>,
    pub featured: bool,
}

/// One or two columns of table rows; `right` is empty in single-column mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableColumns {
    pub left: Vec<StandingsLine>,
    pub right: Vec<StandingsLine>,
}

impl TableColumns {
    pub fn rows(&self) -> impl Iterator<Item = &StandingsLine> {
        self.left.iter().chain(self.right.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLine {
    pub home: String,
    pub away: String,
    pub state: MatchState,
    pub score: Option<(i64, i64)>,
    pub date: Option<NaiveDateTime>,
    pub time: Option<String>,
    pub featured: bool,
}

impl MatchLine {
    fn from_match(m: &Match, featured_team: &str) -> Self {
        Self {
            home: m.home.clone(),
            away: m.away.clone(),
            state: classify(m),
            score: m.goals(),
            date: m.date,
            time: m.time.clone(),
            featured: involves(m, featured_team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBlock {
    pub label: String,
    pub lines: Vec<MatchLine>,
}

/// The featured team's fixtures: played newest-first, then upcoming
/// earliest-first, plus the same list split by the side the team plays on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedFixtures {
    pub team: String,
    pub all: Vec<MatchLine>,
    pub home: Vec<MatchLine>,
    pub away: Vec<MatchLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatrixCell {
    Score(String),
    Scheduled(String),
    Other(String),
    Unscheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixGrid {
    pub teams: Vec<String>,
    pub rows: Vec<Vec<MatrixCell>>,
}

/// The slide set shown before any data has arrived.
pub fn initial_slides() -> Vec<Slide> {
    vec![intro_slide(&Dataset::default())]
}

/// Full pass over every slide category, in display order.
pub fn build_slides(snapshot: &Snapshot, opts: &BuildOptions) -> Vec<Slide> {
    let data = &snapshot.dataset;
    let mut slides = vec![
        intro_slide(data),
        standings_slide(&data.league_table, &data.all_matches, &data.featured_team, &opts.profile),
    ];
    for (idx, rows) in data.periods.iter().enumerate() {
        let number = u8::try_from(idx + 1).unwrap_or(u8::MAX);
        if let Some(slide) = period_slide(number, rows, &data.featured_team, opts) {
            slides.push(slide);
        }
    }
    slides.push(recent_results_slide(&data.last_week_results, &data.featured_team));
    slides.push(club_results_slide(&snapshot.clubs, snapshot.fetched_on, &data.featured_team));
    slides.push(upcoming_slide(&data.next_week_matches, &data.featured_team));
    slides.push(featured_slide(
        &data.featured_matches.played,
        &data.featured_matches.upcoming,
        &data.featured_team,
    ));
    if opts.profile.team_matrix {
        slides.push(matrix_slide(&data.team_matrix));
    }

    tracing::info!(
        slides = slides.len(),
        placeholders = slides.iter().filter(|s| s.is_placeholder()).count(),
        "slides built"
    );
    slides
}

pub fn intro_slide(data: &Dataset) -> Slide {
    let (competition_played, competition_total) = played_count(&data.all_matches);
    Slide {
        kind: SlideKind::Intro,
        title: data.featured_team.to_uppercase(),
        body: SlideBody::Intro(IntroSlide {
            team: data.featured_team.clone(),
            competition_played,
            competition_total,
            featured_played: data.featured_matches.played.len(),
            featured_upcoming: data.featured_matches.upcoming.len(),
            test_mode: data.featured_team == TEST_MODE_TEAM,
        }),
    }
}

pub fn standings_slide(
    table: &[StandingsRow],
    all_matches: &[Match],
    featured_team: &str,
    profile: &DisplayProfile,
) -> Slide {
    let title = "Stand".to_string();
    if table.is_empty() {
        return placeholder(SlideKind::Standings, title, NO_DATA_TEXT);
    }

    let mut rows: Vec<&StandingsRow> = table.iter().collect();
    rows.sort_by_key(|r| r.position);
    let lines: Vec<StandingsLine> = rows
        .into_iter()
        .map(|row| StandingsLine {
            form: profile
                .form_column
                .then(|| compute_form(&row.team, all_matches)),
            featured: is_same_team(&row.team, featured_team),
            ..standings_line(row)
        })
        .collect();

    // Two columns only when both halves fit.
    let columns = if profile.two_columns && lines.len() <= COLUMN_ROWS * 2 {
        let mut left = lines;
        let right = left.split_off(left.len().min(COLUMN_ROWS));
        TableColumns { left, right }
    } else {
        TableColumns {
            left: lines,
            right: Vec::new(),
        }
    };

    Slide {
        kind: SlideKind::Standings,
        title,
        body: SlideBody::Table(columns),
    }
}

/// `None` when the period has no rows, or nobody in it has played yet and
/// `force_periods` is off.
pub fn period_slide(
    number: u8,
    rows: &[StandingsRow],
    featured_team: &str,
    opts: &BuildOptions,
) -> Option<Slide> {
    let title = format!("Periode {number}");
    if rows.is_empty() {
        tracing::debug!(period = number, "period skipped: no data");
        return None;
    }
    if !opts.force_periods && !rows.iter().any(|r| r.played > 0) {
        tracing::debug!(period = number, "period skipped: no matches played");
        return None;
    }

    let mut sorted: Vec<&StandingsRow> = rows.iter().collect();
    sorted.sort_by_key(|r| r.position);
    let mut columns = TableColumns::default();
    for row in sorted {
        let line = StandingsLine {
            featured: mentions_team_ci(&row.team, featured_team),
            ..standings_line(row)
        };
        if opts.profile.two_columns && row.position as usize > COLUMN_ROWS {
            columns.right.push(line);
        } else {
            columns.left.push(line);
        }
    }

    Some(Slide {
        kind: SlideKind::Period(number),
        title,
        body: SlideBody::Table(columns),
    })
}

fn standings_line(row: &StandingsRow) -> StandingsLine {
    StandingsLine {
        position: row.position,
        team: row.team.clone(),
        played: row.played,
        wins: row.wins,
        draws: row.draws,
        losses: row.losses,
        goal_difference: row.goal_difference(),
        points: row.points,
        form: None,
        featured: false,
    }
}

pub fn recent_results_slide(results: &[Match], featured_team: &str) -> Slide {
    let title = "Recente Wedstrijduitslagen".to_string();
    let mut played: Vec<Match> = results.iter().filter(|m| is_played(m)).cloned().collect();
    played.sort_by(|a, b| b.date.cmp(&a.date));
    played.truncate(RECENT_RESULTS_LIMIT);

    let blocks = week_blocks(&played, featured_team, WeekOrder::MostRecentFirst);
    if blocks.is_empty() {
        return placeholder(SlideKind::RecentResults, title, NO_RESULTS_TEXT);
    }
    Slide {
        kind: SlideKind::RecentResults,
        title,
        body: SlideBody::Weeks(blocks),
    }
}

pub fn upcoming_slide(fixtures: &[Match], featured_team: &str) -> Slide {
    let title = "Komende Wedstrijden".to_string();
    let blocks = week_blocks(fixtures, featured_team, WeekOrder::EarliestFirst);
    if blocks.is_empty() {
        return placeholder(SlideKind::Upcoming, title, NO_FIXTURES_TEXT);
    }
    Slide {
        kind: SlideKind::Upcoming,
        title,
        body: SlideBody::Weeks(blocks),
    }
}

fn week_blocks(matches: &[Match], featured_team: &str, order: WeekOrder) -> Vec<WeekBlock> {
    group_by_week(matches, featured_team, order)
        .into_iter()
        .map(|bucket| WeekBlock {
            label: bucket.label,
            lines: bucket
                .matches
                .iter()
                .map(|m| MatchLine::from_match(m, featured_team))
                .collect(),
        })
        .collect()
}

pub fn club_results_slide(clubs: &[Match], today: NaiveDate, featured_team: &str) -> Slide {
    let title = "Overige Apeldoornse Clubs".to_string();
    let columns = weekend_columns(clubs, today);
    if columns.is_empty() {
        return placeholder(SlideKind::ClubResults, title, NO_DATA_TEXT);
    }
    let lines = |ms: &[Match]| -> Vec<MatchLine> {
        ms.iter()
            .map(|m| MatchLine::from_match(m, featured_team))
            .collect()
    };
    Slide {
        kind: SlideKind::ClubResults,
        title,
        body: SlideBody::Clubs {
            other_days: lines(&columns.other_days),
            sunday: lines(&columns.sunday),
        },
    }
}

pub fn featured_slide(played: &[Match], upcoming: &[Match], featured_team: &str) -> Slide {
    let title = format!("{featured_team} Wedstrijden");
    let combined: Vec<&Match> = played.iter().chain(upcoming.iter()).collect();

    let mut done: Vec<&Match> = combined.iter().copied().filter(|m| is_played(m)).collect();
    done.sort_by(|a, b| b.date.cmp(&a.date));
    let mut to_play: Vec<&Match> = combined.iter().copied().filter(|m| !is_played(m)).collect();
    to_play.sort_by(|a, b| a.date.cmp(&b.date));

    let ordered: Vec<&Match> = done
        .into_iter()
        .chain(to_play)
        .filter(|m| involves(m, featured_team))
        .collect();
    if ordered.is_empty() {
        return placeholder(SlideKind::FeaturedFixtures, title, NO_FIXTURES_TEXT);
    }

    let line = |m: &&Match| MatchLine::from_match(m, featured_team);
    let fixtures = FeaturedFixtures {
        team: featured_team.to_string(),
        all: ordered.iter().map(line).collect(),
        home: ordered
            .iter()
            .filter(|m| is_same_team(&m.home, featured_team))
            .map(line)
            .collect(),
        away: ordered
            .iter()
            .filter(|m| is_same_team(&m.away, featured_team))
            .map(line)
            .collect(),
    };
    Slide {
        kind: SlideKind::FeaturedFixtures,
        title,
        body: SlideBody::Featured(fixtures),
    }
}

pub fn matrix_slide(matrix: &TeamMatrix) -> Slide {
    let title = "Team vs Team Matrix".to_string();
    if matrix.teams.is_empty() {
        return placeholder(SlideKind::TeamMatrix, title, NO_DATA_TEXT);
    }
    let rows = matrix
        .teams
        .iter()
        .map(|team| {
            matrix
                .teams
                .iter()
                .map(|opponent| matrix_cell(matrix.cell(team, opponent)))
                .collect()
        })
        .collect();
    Slide {
        kind: SlideKind::TeamMatrix,
        title,
        body: SlideBody::Matrix(MatrixGrid {
            teams: matrix.teams.clone(),
            rows,
        }),
    }
}

/// Short dashed values are scores; dates collapse to `DD-MM`.
pub fn matrix_cell(raw: Option<&str>) -> MatrixCell {
    let Some(raw) = raw else {
        return MatrixCell::Unscheduled;
    };
    if raw.contains('-') && raw.chars().count() <= 5 {
        return MatrixCell::Score(raw.to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return MatrixCell::Scheduled(date.format("%d-%m").to_string());
    }
    if let Some(dt) = crate::payload::parse_match_date(raw, None) {
        return MatrixCell::Scheduled(dt.format("%d-%m").to_string());
    }
    MatrixCell::Other(raw.to_string())
}

fn placeholder(kind: SlideKind, title: String, text: &str) -> Slide {
    Slide {
        kind,
        title,
        body: SlideBody::Placeholder(text.to_string()),
    }
}

/// `+ 3`, `-12`: explicit sign, single digits padded to line up.
pub fn format_goal_difference(diff: i64) -> String {
    let sign = if diff >= 0 { '+' } else { '-' };
    let abs = diff.unsigned_abs();
    if abs < 10 {
        format!("{sign} {abs}")
    } else {
        format!("{sign}{abs}")
    }
}
