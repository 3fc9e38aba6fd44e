//! Time sources for the round clock
//!
//! Everything is plain `f64` seconds from an arbitrary origin.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of "now" for the session
pub trait TimeSource {
    /// Seconds since an arbitrary, fixed origin. Never decreases.
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        // Monotonic: ignore attempts to go back
        if now > self.now.get() {
            self.now.set(now);
        }
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now.get() + secs.max(0.0));
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_shared_between_clones() {
        let time = ManualTime::new(1.0);
        let handle = time.clone();
        handle.advance(2.5);
        assert_eq!(time.now(), 3.5);
        handle.set(10.0);
        assert_eq!(time.now(), 10.0);
    }

    #[test]
    fn test_manual_time_never_goes_back() {
        let time = ManualTime::new(5.0);
        time.set(2.0);
        time.advance(-1.0);
        assert_eq!(time.now(), 5.0);
    }

    #[test]
    fn test_monotonic_time_advances() {
        let time = MonotonicTime::new();
        let a = time.now();
        let b = time.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
