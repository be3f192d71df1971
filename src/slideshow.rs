//! The slideshow state machine.
//!
//! `Idle -> Loading -> Ready(index)`; while ready the countdown advances the
//! index cyclically unless paused. Refreshes pass through `Loading` again
//! but keep the display (and the countdown) running until the new slide
//! list is swapped in as a whole.

use std::time::{Duration, Instant};

use crate::slides::{Slide, initial_slides};
use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoMode {
    Club,
    League,
}

impl LogoMode {
    fn toggled(self) -> Self {
        match self {
            LogoMode::Club => LogoMode::League,
            LogoMode::League => LogoMode::Club,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// Index went back to 0: one full cycle is complete.
    Wrapped,
}

#[derive(Debug, Clone)]
pub struct Slideshow {
    phase: Phase,
    slides: Vec<Slide>,
    index: usize,
    paused: bool,
    shown: bool,
    countdown: Countdown,
    duration: Duration,
    cycles: u64,
    logos: bool,
    logo_mode: LogoMode,
}

impl Slideshow {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            slides: initial_slides(),
            index: 0,
            paused: false,
            shown: false,
            countdown: Countdown::new(),
            duration,
            cycles: 0,
            logos: true,
            logo_mode: LogoMode::Club,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn logo_mode(&self) -> LogoMode {
        self.logo_mode
    }

    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.countdown.remaining_secs(now)
    }

    /// Whether the header shows logos at all. Without them the mode stays
    /// parked on `Club` so re-enabling always starts from the club badge.
    pub fn set_logos(&mut self, logos: bool) {
        self.logos = logos;
        if !logos {
            self.logo_mode = LogoMode::Club;
        }
    }

    /// Enter `Loading`. Returns false when a load is already in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.phase == Phase::Loading {
            return false;
        }
        self.phase = Phase::Loading;
        true
    }

    /// Swap in a freshly built slide list. The index survives a refresh
    /// unless the slide count changed; the first load always starts at 0.
    pub fn finish_load(&mut self, slides: Vec<Slide>, now: Instant) {
        let structural = !self.shown || slides.len() != self.slides.len();
        self.slides = slides;
        self.phase = Phase::Ready;
        self.shown = true;
        if structural {
            self.index = 0;
            self.restart_countdown(now);
        } else if !self.countdown.is_armed() {
            self.restart_countdown(now);
        }
    }

    /// Keep whatever is on screen; the very first failure still starts the
    /// rotation over the slides that exist. Also used when a refresh brings
    /// nothing new.
    pub fn keep_current(&mut self, now: Instant) {
        self.phase = Phase::Ready;
        if !self.shown {
            self.shown = true;
            self.index = 0;
            self.restart_countdown(now);
        }
    }

    /// Rebuild in place without a fetch, e.g. after a profile change.
    pub fn replace_slides(&mut self, slides: Vec<Slide>, now: Instant) {
        if slides.len() != self.slides.len() {
            self.index = 0;
            self.slides = slides;
            self.restart_countdown(now);
        } else {
            self.slides = slides;
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<Advance> {
        if !self.shown || self.paused || !self.countdown.is_expired(now) {
            return None;
        }
        Some(self.step_forward(now))
    }

    pub fn next(&mut self, now: Instant) -> Option<Advance> {
        if !self.shown {
            return None;
        }
        Some(self.step_forward(now))
    }

    pub fn prev(&mut self, now: Instant) -> Option<Advance> {
        if !self.shown || self.slides.is_empty() {
            return None;
        }
        self.index = self.index.checked_sub(1).unwrap_or(self.slides.len() - 1);
        self.restart_countdown(now);
        Some(Advance::Moved)
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        self.restart_countdown(now);
    }

    pub fn set_duration(&mut self, duration: Duration, now: Instant) {
        self.duration = duration;
        self.restart_countdown(now);
    }

    fn step_forward(&mut self, now: Instant) -> Advance {
        let len = self.slides.len().max(1);
        self.index = (self.index + 1) % len;
        self.restart_countdown(now);
        if self.index == 0 {
            self.cycles += 1;
            if self.logos {
                self.logo_mode = self.logo_mode.toggled();
            }
            Advance::Wrapped
        } else {
            Advance::Moved
        }
    }

    // A lone slide has nothing to rotate to.
    fn restart_countdown(&mut self, now: Instant) {
        if self.paused || self.slides.len() <= 1 {
            self.countdown.cancel();
        } else {
            self.countdown.arm(self.duration, now);
        }
    }
}
