use std::time::{Duration, Instant};

/// Longest deadline the countdown will hold.
pub const MAX_ARM: Duration = Duration::from_secs(24 * 3600);

/// A single pending deadline. Arming always replaces the previous deadline,
/// so there is never more than one outstanding timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Durations beyond `MAX_ARM` are capped; `Instant` overflow leaves the
    /// countdown disarmed instead of panicking.
    pub fn arm(&mut self, duration: Duration, now: Instant) {
        self.deadline = now.checked_add(duration.min(MAX_ARM));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whole seconds left, rounded up, as shown on screen.
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.remaining(now).map(|r| {
            let secs = r.as_secs();
            if r.subsec_nanos() > 0 { secs + 1 } else { secs }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_replaces_deadline() {
        let t0 = Instant::now();
        let mut c = Countdown::new();
        c.arm(Duration::from_secs(10), t0);
        c.arm(Duration::from_secs(3), t0);
        assert!(c.is_expired(t0 + Duration::from_secs(3)));
        assert_eq!(c.remaining_secs(t0 + Duration::from_millis(500)), Some(3));
    }

    #[test]
    fn oversized_duration_is_capped() {
        let t0 = Instant::now();
        let mut c = Countdown::new();
        c.arm(Duration::from_secs(u64::MAX), t0);
        assert!(c.is_armed());
        assert_eq!(c.remaining(t0), Some(MAX_ARM));
    }

    #[test]
    fn cancelled_never_expires() {
        let t0 = Instant::now();
        let mut c = Countdown::new();
        c.arm(Duration::from_secs(1), t0);
        c.cancel();
        assert!(!c.is_expired(t0 + Duration::from_secs(5)));
        assert_eq!(c.remaining(t0), None);
    }
}
