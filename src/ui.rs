use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use liga_dashboard::classify::MatchState;
use liga_dashboard::form::{Form, FormOutcome};
use liga_dashboard::slides::{
    FeaturedFixtures, IntroSlide, MatchLine, MatrixCell, MatrixGrid, Slide, SlideBody,
    StandingsLine, TableColumns, WeekBlock, format_goal_difference,
};
use liga_dashboard::slideshow::{LogoMode, Phase};
use liga_dashboard::state::AppState;

const LEAGUE_BANNER: &str = "[LIGA]";
const MATRIX_LABEL_WIDTH: usize = 12;
const MATRIX_CELL_WIDTH: usize = 8;

pub fn draw(frame: &mut Frame, state: &AppState, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_lines(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match state.slideshow.current() {
        Some(slide) => render_slide(frame, chunks[1], slide, state),
        None => render_notice(frame, chunks[1], "Geen slides"),
    }

    let console = Paragraph::new(console_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state, now))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_lines(state: &AppState) -> Vec<Line<'static>> {
    let title = state
        .slideshow
        .current()
        .map(|s| s.title.clone())
        .unwrap_or_default();
    let mut first = Vec::new();
    if state.options.profile.logos {
        let badge = match state.slideshow.logo_mode() {
            LogoMode::Club => format!("[{}]", initials(state.featured_team())),
            LogoMode::League => LEAGUE_BANNER.to_string(),
        };
        first.push(Span::styled(
            format!("{badge} "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    first.push(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let mut second = vec![Span::raw(state.featured_team().to_uppercase())];
    if state.slideshow.phase() == Phase::Loading {
        second.push(Span::styled(" | laden...", Style::default().fg(Color::DarkGray)));
    }
    if let Some(token) = state.last_updated() {
        second.push(Span::styled(
            format!(" | bijgewerkt {token}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.last_error.is_some() {
        second.push(Span::styled(" | offline", Style::default().fg(Color::Red)));
    }
    vec![Line::from(first), Line::from(second)]
}

fn initials(team: &str) -> String {
    team.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn footer_text(state: &AppState, now: Instant) -> String {
    let show = &state.slideshow;
    let position = format!("{}/{}", show.index() + 1, show.len());
    let timer = if show.is_paused() {
        "PAUZE".to_string()
    } else {
        match show.remaining_secs(now) {
            Some(secs) => format!("{secs}s"),
            None => "--".to_string(),
        }
    };
    format!("{position} | {timer} | ←/→ Slide | space Pause | r Refresh | ? Help | q Quit")
}

fn console_text(state: &AppState) -> String {
    state
        .logs
        .back()
        .cloned()
        .unwrap_or_else(|| "No alerts yet".to_string())
}

fn render_slide(frame: &mut Frame, area: Rect, slide: &Slide, state: &AppState) {
    match &slide.body {
        SlideBody::Intro(intro) => render_intro(frame, area, intro),
        SlideBody::Table(columns) => {
            render_table_columns(frame, area, columns, state.options.profile.form_column)
        }
        SlideBody::Weeks(blocks) => render_weeks(frame, area, blocks),
        SlideBody::Clubs { other_days, sunday } => render_clubs(frame, area, other_days, sunday),
        SlideBody::Featured(fixtures) => {
            render_featured(frame, area, fixtures, state.options.profile.two_columns)
        }
        SlideBody::Matrix(grid) => render_matrix(frame, area, grid),
        SlideBody::Placeholder(text) => render_notice(frame, area, text),
    }
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str) {
    let y = area.y + area.height / 2;
    let line_area = Rect {
        x: area.x,
        y,
        width: area.width,
        height: 1u16.min(area.height),
    };
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, line_area);
}

fn render_intro(frame: &mut Frame, area: Rect, intro: &IntroSlide) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(intro.team.to_uppercase(), bold.fg(Color::Yellow))),
        Line::from(""),
        Line::from(format!(
            "Competitie: {} gespeeld, {} te spelen",
            intro.competition_played,
            intro.competition_total - intro.competition_played
        )),
        Line::from(format!(
            "{}: {} gespeeld, {} te spelen",
            intro.team, intro.featured_played, intro.featured_upcoming
        )),
    ];
    if intro.test_mode {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("TEST MODE", bold.fg(Color::Magenta))));
    }
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let inner = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_table_columns(frame: &mut Frame, area: Rect, columns: &TableColumns, show_form: bool) {
    if columns.right.is_empty() {
        render_standings(frame, area, &columns.left, show_form);
        return;
    }
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_standings(frame, halves[0], &columns.left, show_form);
    render_standings(frame, halves[1], &columns.right, show_form);
}

fn render_standings(frame: &mut Frame, area: Rect, rows: &[StandingsLine], show_form: bool) {
    // pos(3) + team + 6 numeric columns (≈26) + form (11)
    let fixed = 3 + 26 + if show_form { 11 } else { 0 };
    if area.height < 2 || (area.width as usize) < fixed + 6 {
        render_notice(frame, area, "Stand heeft meer ruimte nodig");
        return;
    }
    let team_width = (area.width as usize - fixed).min(28);
    let header_style = Style::default().add_modifier(Modifier::BOLD);

    let mut header = format!(
        "{:>2} {:<team_width$} {:>2} {:>2} {:>2} {:>2} {:>4} {:>4}",
        "#", "Team", "GS", "W", "G", "V", "DS", "P"
    );
    if show_form {
        header.push_str("  Vorm");
    }
    let mut lines = vec![Line::from(Span::styled(header, header_style))];

    for row in rows {
        let style = if row.featured {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let text = format!(
            "{:>2} {:<team_width$} {:>2} {:>2} {:>2} {:>2} {:>4} {:>4}",
            row.position,
            truncate(&row.team, team_width),
            row.played,
            row.wins,
            row.draws,
            row.losses,
            format_goal_difference(row.goal_difference),
            row.points,
        );
        let mut spans = vec![Span::styled(text, style)];
        if show_form && let Some(form) = &row.form {
            spans.push(Span::raw("  "));
            spans.extend(form_spans(form));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn form_spans(form: &Form) -> Vec<Span<'static>> {
    form.iter()
        .map(|outcome| {
            let color = match outcome {
                FormOutcome::Win => Color::Green,
                FormOutcome::Draw => Color::Blue,
                FormOutcome::Loss => Color::Red,
                FormOutcome::Unplayed => Color::DarkGray,
            };
            Span::styled("● ", Style::default().fg(color))
        })
        .collect()
}

fn render_weeks(frame: &mut Frame, area: Rect, blocks: &[WeekBlock]) {
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for block in blocks {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(block.label.clone(), label_style)));
        lines.extend(block.lines.iter().map(match_line));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_clubs(frame: &mut Frame, area: Rect, other_days: &[MatchLine], sunday: &[MatchLine]) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_match_list(frame, halves[0], "Zaterdag", other_days);
    render_match_list(frame, halves[1], "Zondag", sunday);
}

fn render_featured(frame: &mut Frame, area: Rect, fixtures: &FeaturedFixtures, split: bool) {
    if !split {
        render_match_list(frame, area, "Alle wedstrijden", &fixtures.all);
        return;
    }
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_match_list(frame, halves[0], "Thuis", &fixtures.home);
    render_match_list(frame, halves[1], "Uit", &fixtures.away);
}

fn render_match_list(frame: &mut Frame, area: Rect, title: &str, lines: &[MatchLine]) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL);
    let body: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled("-", Style::default().fg(Color::DarkGray)))]
    } else {
        lines.iter().map(match_line).collect()
    };
    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn match_line(line: &MatchLine) -> Line<'static> {
    let when = match (line.date, line.time.as_deref()) {
        (Some(date), Some(time)) => format!("{} {time}", date.format("%d-%m")),
        (Some(date), None) => date.format("%d-%m %H:%M").to_string(),
        (None, Some(time)) => time.to_string(),
        (None, None) => String::new(),
    };
    let result = match (line.state, line.score) {
        (MatchState::Played, Some((home, away))) => format!("{home} - {away}"),
        _ => "vs".to_string(),
    };
    let style = if line.featured {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{when:<12}"), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} {result} {}", line.home, line.away), style),
    ])
}

fn render_matrix(frame: &mut Frame, area: Rect, grid: &MatrixGrid) {
    let needed = MATRIX_LABEL_WIDTH + (MATRIX_CELL_WIDTH + 1) * grid.teams.len();
    if (area.width as usize) < needed || (area.height as usize) < grid.teams.len() + 1 {
        render_notice(frame, area, "Matrix heeft meer ruimte nodig");
        return;
    }
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut header = format!("{:<MATRIX_LABEL_WIDTH$}", "");
    for team in &grid.teams {
        header.push_str(&format!(
            "{:<MATRIX_CELL_WIDTH$} ",
            truncate(team, MATRIX_CELL_WIDTH)
        ));
    }
    let mut lines = vec![Line::from(Span::styled(header, bold))];

    for (team, cells) in grid.teams.iter().zip(&grid.rows) {
        let mut spans = vec![Span::styled(
            format!("{:<MATRIX_LABEL_WIDTH$}", truncate(team, MATRIX_LABEL_WIDTH - 1)),
            bold,
        )];
        for cell in cells {
            let (text, color) = match cell {
                MatrixCell::Score(score) => (score.clone(), Color::White),
                MatrixCell::Scheduled(day) => (day.clone(), Color::Cyan),
                MatrixCell::Other(raw) => (truncate(raw, MATRIX_CELL_WIDTH), Color::Gray),
                MatrixCell::Unscheduled => ("-".to_string(), Color::DarkGray),
            };
            spans.push(Span::styled(
                format!("{text:<MATRIX_CELL_WIDTH$} "),
                Style::default().fg(color),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Liga Dashboard - Help",
        "",
        "  → / l        Next slide",
        "  ← / h        Previous slide",
        "  space / p    Pause / resume",
        "  r            Refresh now",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
