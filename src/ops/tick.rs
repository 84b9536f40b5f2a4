use std::time::{Duration, Instant};

/// Periodic timer driven from the UI loop. egui has no timer events, so the app
/// asks `due` on every frame and schedules a repaint for `next_deadline`.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Starting a running timer restarts its period.
    pub fn start(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn stop(&mut self) {
        self.last = None;
    }

    /// True at most once per interval while running.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if running.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let last = self.last?;
        Some(self.interval.saturating_sub(now.saturating_duration_since(last)))
    }
}
