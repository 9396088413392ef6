//! Clock-driven helpers for the roll animation: a repeating `Ticker` and a
//! single-shot `Countdown`. Both are polled with an explicit `now` so the
//! event loop owns the clock.

use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL_MS: u64 = 50;
pub const MIN_INTERVAL_MS: u64 = 10;
pub const MAX_INTERVAL_MS: u64 = 200;
pub const MAX_COUNTDOWN_SECS: u64 = 10;

pub fn clamp_interval_ms(ms: u64) -> u64 {
    ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

pub fn clamp_countdown_secs(secs: u64) -> u64 {
    secs.min(MAX_COUNTDOWN_SECS)
}

/// Repeating timer with explicit start/stop.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(clamp_interval_ms(interval_ms)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the period; a running ticker keeps its current deadline.
    pub fn set_interval(&mut self, interval_ms: u64) -> u64 {
        let ms = clamp_interval_ms(interval_ms);
        self.interval = Duration::from_millis(ms);
        ms
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// True when a tick is due; schedules the following one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Single-shot deadline (auto sign-in after the roll starts).
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
}

impl Countdown {
    /// Arm for `secs` seconds; 0 disarms.
    pub fn arm(&mut self, now: Instant, secs: u64) {
        self.deadline = (secs > 0).then(|| now + Duration::from_secs(clamp_countdown_secs(secs)));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_clamped() {
        assert_eq!(Ticker::new(1).interval(), Duration::from_millis(10));
        assert_eq!(Ticker::new(5000).interval(), Duration::from_millis(200));
        let mut t = Ticker::new(50);
        assert_eq!(t.set_interval(120), 120);
        assert_eq!(t.set_interval(0), 10);
    }

    #[test]
    fn ticker_fires_after_interval() {
        let t0 = Instant::now();
        let mut t = Ticker::new(50);
        assert!(!t.poll(t0));

        t.start(t0);
        assert_eq!(t.time_until(t0), Some(Duration::from_millis(50)));
        assert!(!t.poll(t0 + Duration::from_millis(49)));
        assert!(t.poll(t0 + Duration::from_millis(50)));
        // next one is scheduled from the firing time
        assert!(!t.poll(t0 + Duration::from_millis(60)));
        assert!(t.poll(t0 + Duration::from_millis(100)));

        t.stop();
        assert!(!t.poll(t0 + Duration::from_secs(10)));
        assert_eq!(t.time_until(t0), None);
    }

    #[test]
    fn countdown_fires_once() {
        let t0 = Instant::now();
        let mut c = Countdown::default();
        c.arm(t0, 2);
        assert_eq!(c.time_until(t0), Some(Duration::from_secs(2)));
        assert!(!c.poll(t0 + Duration::from_secs(1)));
        assert!(c.poll(t0 + Duration::from_secs(2)));
        assert!(!c.poll(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn zero_countdown_is_disarmed() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        c.arm(t0, 0);
        assert_eq!(c.time_until(t0), None);
        assert!(!c.poll(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn countdown_is_capped() {
        let t0 = Instant::now();
        let mut c = Countdown::default();
        c.arm(t0, 60);
        assert_eq!(c.time_until(t0), Some(Duration::from_secs(10)));
    }
}
