use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;

use liga_dashboard::config::{ProfileChoice, parse_bool_env};
use liga_dashboard::form::FormOutcome;
use liga_dashboard::logging;
use liga_dashboard::model::Snapshot;
use liga_dashboard::payload;
use liga_dashboard::slides::{
    BuildOptions, DisplayProfile, MatchLine, MatrixCell, SlideBody, StandingsLine, build_slides,
    format_goal_difference,
};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr_logging();

    let (flags, paths): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("--"));
    let as_json = flags.iter().any(|f| f == "--json");
    let mut args = paths.into_iter();
    let Some(dashboard) = args.next().map(PathBuf::from) else {
        bail!("usage: slides_dump [--json] <dashboard.json> [clubs.json]");
    };
    let clubs_path = args.next().map(PathBuf::from);

    let dataset = payload::read_dashboard_file(&dashboard)?;
    let clubs = match clubs_path {
        Some(path) => payload::read_clubs_file(&path)?,
        None => Vec::new(),
    };

    let profile = match ProfileChoice::parse(&std::env::var("DISPLAY_PROFILE").unwrap_or_default())
        .context("DISPLAY_PROFILE")?
    {
        ProfileChoice::Fixed(profile) => profile,
        ProfileChoice::Auto => DisplayProfile::desktop(),
    };
    let force_periods = parse_bool_env("FORCE_PERIOD_SLIDES", false);

    let snapshot = Snapshot {
        dataset,
        clubs,
        fetched_on: Local::now().date_naive(),
    };
    let slides = build_slides(
        &snapshot,
        &BuildOptions {
            profile,
            force_periods,
        },
    );

    if as_json {
        let out = serde_json::to_string_pretty(&slides).context("failed to encode slides")?;
        println!("{out}");
        return Ok(());
    }

    for (idx, slide) in slides.iter().enumerate() {
        println!("== {}/{} {} ==", idx + 1, slides.len(), slide.title);
        match &slide.body {
            SlideBody::Intro(intro) => {
                println!("{}", intro.team.to_uppercase());
                println!(
                    "competition: {} played / {} total",
                    intro.competition_played, intro.competition_total
                );
                println!(
                    "{}: {} played / {} upcoming",
                    intro.team, intro.featured_played, intro.featured_upcoming
                );
                if intro.test_mode {
                    println!("TEST MODE");
                }
            }
            SlideBody::Table(columns) => {
                for row in &columns.left {
                    println!("{}", standings_text(row));
                }
                if !columns.right.is_empty() {
                    println!("--");
                    for row in &columns.right {
                        println!("{}", standings_text(row));
                    }
                }
            }
            SlideBody::Weeks(blocks) => {
                for block in blocks {
                    println!("[{}]", block.label);
                    for line in &block.lines {
                        println!("  {}", match_text(line));
                    }
                }
            }
            SlideBody::Clubs { other_days, sunday } => {
                println!("[zaterdag]");
                for line in other_days {
                    println!("  {}", match_text(line));
                }
                println!("[zondag]");
                for line in sunday {
                    println!("  {}", match_text(line));
                }
            }
            SlideBody::Featured(fixtures) => {
                for line in &fixtures.all {
                    println!("  {}", match_text(line));
                }
                println!("home {} / away {}", fixtures.home.len(), fixtures.away.len());
            }
            SlideBody::Matrix(grid) => {
                for (team, cells) in grid.teams.iter().zip(&grid.rows) {
                    let cells: Vec<String> = cells
                        .iter()
                        .map(|cell| match cell {
                            MatrixCell::Score(v) | MatrixCell::Scheduled(v) | MatrixCell::Other(v) => {
                                v.clone()
                            }
                            MatrixCell::Unscheduled => "-".to_string(),
                        })
                        .collect();
                    println!("{team:<20} {}", cells.join(" | "));
                }
            }
            SlideBody::Placeholder(text) => println!("({text})"),
        }
        println!();
    }
    Ok(())
}

fn standings_text(row: &StandingsLine) -> String {
    let mut out = format!(
        "{:>2}. {:<24} {:>2} {:>2} {:>2} {:>2} {:>4} {:>3}",
        row.position,
        row.team,
        row.played,
        row.wins,
        row.draws,
        row.losses,
        format_goal_difference(row.goal_difference),
        row.points
    );
    if let Some(form) = &row.form {
        out.push(' ');
        out.extend(form.iter().map(|f| match f {
            FormOutcome::Win => 'W',
            FormOutcome::Draw => 'G',
            FormOutcome::Loss => 'V',
            FormOutcome::Unplayed => '.',
        }));
    }
    if row.featured {
        out.push_str(" *");
    }
    out
}

fn match_text(line: &MatchLine) -> String {
    let when = line
        .date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "????-??-??".to_string());
    let score = match line.score {
        Some((h, a)) => format!("{h}-{a}"),
        None => "vs".to_string(),
    };
    let marker = if line.featured { " *" } else { "" };
    format!("{when}  {} {score} {}{marker}", line.home, line.away)
}
