use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::schedule::{FastWindow, RefreshPolicy, parse_weekday, parse_window};
use crate::slides::DisplayProfile;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const MAX_SCREEN_SECS: u64 = 24 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileChoice {
    Auto,
    Fixed(DisplayProfile),
}

impl ProfileChoice {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "desktop" => Ok(Self::Fixed(DisplayProfile::desktop())),
            "tv" => Ok(Self::Fixed(DisplayProfile::tv())),
            "mobile" => Ok(Self::Fixed(DisplayProfile::mobile())),
            other => Err(anyhow!(
                "unknown display profile {other:?} (expected auto, desktop, mobile or tv)"
            )),
        }
    }

    pub fn resolve(self, width: u16, height: u16) -> DisplayProfile {
        match self {
            Self::Auto => DisplayProfile::for_viewport(width, height),
            Self::Fixed(profile) => profile,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Source {
    Http { base_url: String },
    File {
        dashboard: PathBuf,
        clubs: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub screen_duration: Duration,
    pub refresh: RefreshPolicy,
    pub force_periods: bool,
    pub profile: ProfileChoice,
    pub log_dir: PathBuf,
}

impl Config {
    /// Read settings from the environment (after `.env.local` / `.env`).
    pub fn from_env() -> Result<Self> {
        let source = match env::var("DATA_FILE").ok().filter(|v| !v.trim().is_empty()) {
            Some(path) => Source::File {
                dashboard: PathBuf::from(path),
                clubs: env::var("CLUBS_FILE")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from),
            },
            None => Source::Http {
                base_url: env::var("DASHBOARD_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            },
        };

        let screen_duration =
            Duration::from_secs(parse_u64_env("SCREEN_DURATION_SECONDS", 12).clamp(1, MAX_SCREEN_SECS));
        let normal = Duration::from_secs(parse_u64_env("REFRESH_SECS", 30 * 60).max(10));
        let fast = Duration::from_secs(parse_u64_env("FAST_REFRESH_SECS", 30).max(5));

        let day = parse_weekday(&env::var("FAST_REFRESH_DAY").unwrap_or_else(|_| "sat".to_string()))
            .context("FAST_REFRESH_DAY")?;
        let fast_window = match day {
            Some(day) => {
                let raw = env::var("FAST_REFRESH_WINDOW").unwrap_or_else(|_| "16:00-19:30".to_string());
                let (start, end) = parse_window(&raw).context("FAST_REFRESH_WINDOW")?;
                Some(FastWindow { day, start, end })
            }
            None => None,
        };

        let profile = ProfileChoice::parse(&env::var("DISPLAY_PROFILE").unwrap_or_default())
            .context("DISPLAY_PROFILE")?;

        Ok(Self {
            source,
            screen_duration,
            refresh: RefreshPolicy {
                normal,
                fast,
                fast_window,
            },
            force_periods: parse_bool_env("FORCE_PERIOD_SLIDES", false),
            profile,
            log_dir: PathBuf::from(env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string())),
        })
    }
}

fn parse_u64_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_choice_parses_presets() {
        assert_eq!(ProfileChoice::parse("").unwrap(), ProfileChoice::Auto);
        assert_eq!(
            ProfileChoice::parse("Mobile").unwrap(),
            ProfileChoice::Fixed(DisplayProfile::mobile())
        );
        assert!(ProfileChoice::parse("watch").is_err());
    }

    #[test]
    fn missing_flag_uses_default() {
        assert!(parse_bool_env("LIGA_DASHBOARD_NEVER_SET_FLAG", true));
        assert!(!parse_bool_env("LIGA_DASHBOARD_NEVER_SET_FLAG", false));
    }

    #[test]
    fn auto_follows_viewport() {
        assert_eq!(ProfileChoice::Auto.resolve(80, 24), DisplayProfile::mobile());
        assert_eq!(ProfileChoice::Auto.resolve(120, 40), DisplayProfile::desktop());
    }
}
