use std::time::{Duration, Instant};

use liga_dashboard::slides::{Slide, SlideBody, SlideKind};
use liga_dashboard::slideshow::{Advance, LogoMode, Phase, Slideshow};

const SCREEN: Duration = Duration::from_secs(12);

fn slides(n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| Slide {
            kind: SlideKind::Standings,
            title: format!("slide {i}"),
            body: SlideBody::Placeholder(String::new()),
        })
        .collect()
}

fn loaded(n: usize, t0: Instant) -> Slideshow {
    let mut show = Slideshow::new(SCREEN);
    assert!(show.begin_load());
    show.finish_load(slides(n), t0);
    show
}

#[test]
fn starts_idle_with_intro() {
    let show = Slideshow::new(SCREEN);
    assert_eq!(show.phase(), Phase::Idle);
    assert_eq!(show.len(), 1);
    assert_eq!(show.current().map(|s| s.kind), Some(SlideKind::Intro));
}

#[test]
fn first_load_starts_at_zero_with_countdown() {
    let t0 = Instant::now();
    let show = loaded(4, t0);
    assert_eq!(show.phase(), Phase::Ready);
    assert_eq!(show.index(), 0);
    assert_eq!(show.remaining_secs(t0), Some(12));
}

#[test]
fn wraps_to_zero_and_counts_cycle() {
    let t0 = Instant::now();
    let mut show = loaded(3, t0);
    assert_eq!(show.next(t0), Some(Advance::Moved));
    assert_eq!(show.next(t0), Some(Advance::Moved));
    assert_eq!(show.index(), 2);
    assert_eq!(show.cycles(), 0);

    assert_eq!(show.next(t0), Some(Advance::Wrapped));
    assert_eq!(show.index(), 0);
    assert_eq!(show.cycles(), 1);
    assert_eq!(show.logo_mode(), LogoMode::League);
}

#[test]
fn timer_expiry_advances() {
    let t0 = Instant::now();
    let mut show = loaded(3, t0);
    assert_eq!(show.tick(t0 + Duration::from_secs(11)), None);
    let t1 = t0 + SCREEN;
    assert_eq!(show.tick(t1), Some(Advance::Moved));
    assert_eq!(show.index(), 1);
    // Countdown restarted from the advance.
    assert_eq!(show.tick(t1 + Duration::from_secs(11)), None);
    assert_eq!(show.tick(t1 + SCREEN), Some(Advance::Moved));
    assert_eq!(show.tick(t1 + SCREEN * 2), Some(Advance::Wrapped));
    assert_eq!(show.logo_mode(), LogoMode::League);
}

#[test]
fn prev_wraps_backwards() {
    let t0 = Instant::now();
    let mut show = loaded(3, t0);
    assert_eq!(show.prev(t0), Some(Advance::Moved));
    assert_eq!(show.index(), 2);
    assert_eq!(show.cycles(), 0);
}

#[test]
fn pause_stops_the_timer() {
    let t0 = Instant::now();
    let mut show = loaded(3, t0);
    show.toggle_pause(t0);
    assert!(show.is_paused());
    assert_eq!(show.remaining_secs(t0), None);
    assert_eq!(show.tick(t0 + SCREEN * 5), None);

    // Manual navigation still works while paused.
    assert_eq!(show.next(t0), Some(Advance::Moved));

    show.toggle_pause(t0);
    assert_eq!(show.tick(t0 + SCREEN), Some(Advance::Moved));
}

#[test]
fn single_slide_has_no_countdown() {
    let t0 = Instant::now();
    let mut show = loaded(1, t0);
    assert_eq!(show.remaining_secs(t0), None);
    assert_eq!(show.tick(t0 + SCREEN * 3), None);
}

#[test]
fn refresh_keeps_index_when_count_is_stable() {
    let t0 = Instant::now();
    let mut show = loaded(4, t0);
    show.next(t0);
    show.next(t0);
    assert!(show.begin_load());
    show.finish_load(slides(4), t0);
    assert_eq!(show.index(), 2);

    assert!(show.begin_load());
    show.finish_load(slides(5), t0);
    assert_eq!(show.index(), 0);
}

#[test]
fn only_one_load_in_flight() {
    let mut show = Slideshow::new(SCREEN);
    assert!(show.begin_load());
    assert!(!show.begin_load());
    assert_eq!(show.phase(), Phase::Loading);
}

#[test]
fn failed_first_load_falls_back_to_intro() {
    let t0 = Instant::now();
    let mut show = Slideshow::new(SCREEN);
    assert_eq!(show.next(t0), None);
    show.begin_load();
    show.keep_current(t0);
    assert_eq!(show.phase(), Phase::Ready);
    assert_eq!(show.len(), 1);
    assert_eq!(show.index(), 0);
    assert_eq!(show.current().map(|s| s.kind), Some(SlideKind::Intro));
}

#[test]
fn failed_refresh_keeps_position() {
    let t0 = Instant::now();
    let mut show = loaded(4, t0);
    show.next(t0);
    show.begin_load();
    show.keep_current(t0);
    assert_eq!(show.index(), 1);
    assert_eq!(show.len(), 4);
}

#[test]
fn duration_change_rearms() {
    let t0 = Instant::now();
    let mut show = loaded(2, t0);
    show.set_duration(Duration::from_secs(3), t0);
    assert_eq!(show.remaining_secs(t0), Some(3));
    assert_eq!(show.tick(t0 + Duration::from_secs(3)), Some(Advance::Moved));
    assert_eq!(show.tick(t0 + Duration::from_secs(6)), Some(Advance::Wrapped));
}

#[test]
fn huge_duration_does_not_overflow() {
    let t0 = Instant::now();
    let mut show = Slideshow::new(Duration::from_secs(u64::MAX));
    assert!(show.begin_load());
    show.finish_load(slides(3), t0);
    assert_eq!(show.phase(), Phase::Ready);
    assert_eq!(show.remaining_secs(t0), Some(24 * 3600));
    assert_eq!(show.tick(t0 + Duration::from_secs(3600)), None);
    assert_eq!(show.next(t0), Some(Advance::Moved));
}

#[test]
fn logo_mode_holds_without_logos() {
    let t0 = Instant::now();
    let mut show = loaded(2, t0);
    show.set_logos(false);
    assert_eq!(show.next(t0), Some(Advance::Moved));
    assert_eq!(show.next(t0), Some(Advance::Wrapped));
    assert_eq!(show.cycles(), 1);
    assert_eq!(show.logo_mode(), LogoMode::Club);

    show.set_logos(true);
    show.next(t0);
    assert_eq!(show.next(t0), Some(Advance::Wrapped));
    assert_eq!(show.logo_mode(), LogoMode::League);

    show.set_logos(false);
    assert_eq!(show.logo_mode(), LogoMode::Club);
}
