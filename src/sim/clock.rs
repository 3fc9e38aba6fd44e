//! Pause-aware round clock
//!
//! Works on plain seconds from a [`TimeSource`](crate::platform::TimeSource)
//! so tests can drive it with a manual clock.

use serde::{Deserialize, Serialize};

/// Elapsed game time for one round, excluding every paused span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    start: f64,
    paused_total: f64,
    pause_started: Option<f64>,
}

impl SessionClock {
    /// Start a round clock at `now`
    pub fn new(now: f64) -> Self {
        Self {
            start: now,
            paused_total: 0.0,
            pause_started: None,
        }
    }

    /// Restart at `now`, dropping all pause history
    pub fn reset(&mut self, now: f64) {
        *self = Self::new(now);
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started.is_some()
    }

    /// Total time spent paused so far (completed pauses only)
    pub fn paused_total(&self) -> f64 {
        self.paused_total
    }

    /// Freeze game time. Pausing twice keeps the first pause start.
    pub fn pause(&mut self, now: f64) {
        if self.pause_started.is_none() {
            self.pause_started = Some(now);
        }
    }

    /// Unfreeze game time, adding the paused span to the total
    pub fn resume(&mut self, now: f64) {
        if let Some(started) = self.pause_started.take() {
            self.paused_total += (now - started).max(0.0);
        }
    }

    /// Game time since the start, never counting pauses
    pub fn elapsed(&self, now: f64) -> f64 {
        let end = self.pause_started.unwrap_or(now);
        (end - self.start - self.paused_total).max(0.0)
    }
}
