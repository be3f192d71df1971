use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::ProfileChoice;
use crate::model::{DEFAULT_FEATURED_TEAM, Snapshot};
use crate::slides::{BuildOptions, DisplayProfile, build_slides};
use crate::slideshow::Slideshow;

pub const MAX_LOGS: usize = 50;

/// Messages from the provider thread to the UI loop.
#[derive(Debug, Clone)]
pub enum Delta {
    Loaded(Box<Snapshot>),
    LoadFailed { error: String, silent: bool },
    Log(String),
}

/// Messages from the UI loop to the provider thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCommand {
    /// `silent` refreshes (cycle wrap, timer) only log at debug level.
    Refresh { silent: bool },
    Shutdown,
}

#[derive(Debug)]
pub struct AppState {
    pub slideshow: Slideshow,
    pub profile_choice: ProfileChoice,
    pub options: BuildOptions,
    pub snapshot: Option<Snapshot>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub last_error: Option<String>,
    pub loads: u64,
}

impl AppState {
    pub fn new(screen_duration: Duration, profile_choice: ProfileChoice, force_periods: bool) -> Self {
        let profile = match profile_choice {
            ProfileChoice::Fixed(profile) => profile,
            ProfileChoice::Auto => DisplayProfile::default(),
        };
        let mut slideshow = Slideshow::new(screen_duration);
        slideshow.set_logos(profile.logos);
        Self {
            slideshow,
            profile_choice,
            options: BuildOptions {
                profile,
                force_periods,
            },
            snapshot: None,
            logs: VecDeque::new(),
            help_overlay: false,
            last_error: None,
            loads: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        if msg.starts_with("[WARN]") {
            tracing::warn!(target: "liga_dashboard::console", "{msg}");
        } else {
            tracing::info!(target: "liga_dashboard::console", "{msg}");
        }
        self.logs.push_back(msg);
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn featured_team(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.dataset.featured_team.as_str())
            .unwrap_or(DEFAULT_FEATURED_TEAM)
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.dataset.last_updated.as_deref())
    }

    /// Mark a refresh as in flight. False when one already is, so the
    /// caller should not queue another fetch.
    pub fn begin_refresh(&mut self) -> bool {
        self.slideshow.begin_load()
    }

    /// Re-resolve an `auto` profile for a new terminal size and rebuild from
    /// the retained snapshot when it changed. Returns true on a rebuild.
    pub fn resize(&mut self, width: u16, height: u16, now: Instant) -> bool {
        let profile = self.profile_choice.resolve(width, height);
        self.set_profile(profile, now)
    }

    pub fn set_profile(&mut self, profile: DisplayProfile, now: Instant) -> bool {
        if self.options.profile == profile {
            return false;
        }
        self.options.profile = profile;
        self.slideshow.set_logos(profile.logos);
        let Some(snapshot) = self.snapshot.as_ref() else {
            return false;
        };
        let slides = build_slides(snapshot, &self.options);
        self.slideshow.replace_slides(slides, now);
        tracing::debug!(?profile, "display profile changed");
        true
    }

    pub fn toggle_help(&mut self) {
        self.help_overlay = !self.help_overlay;
    }

    fn is_unchanged(&self, next: &Snapshot) -> bool {
        let Some(prev) = self.snapshot.as_ref() else {
            return false;
        };
        prev.dataset.last_updated.is_some()
            && prev.dataset.last_updated == next.dataset.last_updated
            && prev.clubs == next.clubs
            && prev.fetched_on == next.fetched_on
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::Loaded(snapshot) => {
            state.last_error = None;
            if state.is_unchanged(&snapshot) {
                tracing::debug!(
                    last_updated = ?snapshot.dataset.last_updated,
                    "data unchanged; keeping slides"
                );
                state.slideshow.keep_current(now);
                return;
            }
            let slides = build_slides(&snapshot, &state.options);
            let count = slides.len();
            state.slideshow.finish_load(slides, now);
            state.loads += 1;
            let team = snapshot.dataset.featured_team.clone();
            state.snapshot = Some(*snapshot);
            state.push_log(format!("[INFO] Loaded {count} slides for {team}"));
        }
        Delta::LoadFailed { error, silent } => {
            state.slideshow.keep_current(now);
            if silent {
                tracing::warn!(%error, "background refresh failed");
            } else {
                state.push_log(format!("[WARN] Refresh failed: {error}"));
            }
            state.last_error = Some(error);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
