use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

/// Match-day window in which the backend updates scores every few minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastWindow {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FastWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let t = at.time();
        at.weekday() == self.day && t >= self.start && t < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub normal: Duration,
    pub fast: Duration,
    pub fast_window: Option<FastWindow>,
}

impl RefreshPolicy {
    pub fn interval_at(&self, local: NaiveDateTime) -> Duration {
        match self.fast_window {
            Some(window) if window.contains(local) => self.fast,
            _ => self.normal,
        }
    }

    pub fn is_due(&self, since_last: Duration, local: NaiveDateTime) -> bool {
        since_last >= self.interval_at(local)
    }
}

/// `sat`, `saturday`, `za`, ...; `none` / `off` disables the window.
pub fn parse_weekday(raw: &str) -> Result<Option<Weekday>> {
    let key = raw.trim().to_ascii_lowercase();
    if matches!(key.as_str(), "" | "none" | "off") {
        return Ok(None);
    }
    let day = match key.as_str() {
        "zo" => Weekday::Sun,
        "za" => Weekday::Sat,
        other => other
            .parse::<Weekday>()
            .map_err(|_| anyhow!("unknown weekday {raw:?}"))?,
    };
    Ok(Some(day))
}

/// `HH:MM-HH:MM`, start before end.
pub fn parse_window(raw: &str) -> Result<(NaiveTime, NaiveTime)> {
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| anyhow!("expected HH:MM-HH:MM, got {raw:?}"))?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M")
        .with_context(|| format!("bad window start in {raw:?}"))?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M")
        .with_context(|| format!("bad window end in {raw:?}"))?;
    if start >= end {
        return Err(anyhow!("window {raw:?} ends before it starts"));
    }
    Ok((start, end))
}
