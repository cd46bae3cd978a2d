use std::time::{Duration, Instant};

/// Decides when the simulation advances, independent of how often the
/// driver asks
#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true at most once per interval
    ///
    /// The first call only arms the gate, so the first tick lands one full
    /// interval after the driver starts asking.
    pub fn is_due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Forget the last tick; the next `is_due` arms the gate again
    pub fn rearm(&mut self) {
        self.last_tick = None;
    }
}
