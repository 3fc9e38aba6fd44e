//! Flower spawn scheduling
//!
//! Interval based: a random wait in [250, 550] ms, shortened as the round goes
//! on. Time only counts toward the next spawn while there is room on screen.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::bounds::Playfield;
use super::flower::Flower;
use crate::consts::*;

/// Spawn rate multiplier for the given point in the round
pub fn difficulty(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    1.0 + (elapsed / duration).clamp(0.0, 1.0) * DIFFICULTY_RAMP
}

/// Spawn timer state, reset every round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    since_last_ms: f32,
    next_interval_ms: f32,
}

impl Spawner {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            since_last_ms: 0.0,
            next_interval_ms: Self::roll_interval(rng),
        }
    }

    fn roll_interval<R: Rng + ?Sized>(rng: &mut R) -> f32 {
        rng.random_range(SPAWN_EVERY_MIN_MS..=SPAWN_EVERY_MAX_MS)
    }

    /// Current wait before the next spawn, after the difficulty scaling
    pub fn target_interval_ms(&self, difficulty: f32) -> f32 {
        (self.next_interval_ms / difficulty.max(1.0)).max(SPAWN_FLOOR_MS)
    }

    /// Advance the timer. Returns true when a flower should spawn now.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        difficulty: f32,
        active: usize,
        cap: usize,
        rng: &mut R,
    ) -> bool {
        if active >= cap {
            return false;
        }
        self.since_last_ms += dt * 1000.0;
        if self.since_last_ms < self.target_interval_ms(difficulty) {
            return false;
        }
        self.since_last_ms = 0.0;
        self.next_interval_ms = Self::roll_interval(rng);
        true
    }
}

/// Roll a new flower somewhere fully inside the playfield
pub fn random_flower<R: Rng + ?Sized>(id: u32, field: &Playfield, rng: &mut R) -> Flower {
    let size = rng.random_range(MIN_FLOWER_SIZE..=MAX_FLOWER_SIZE);
    let color = FLOWER_PALETTE.choose(rng).copied().unwrap_or_default();
    let area = field.spawn_area(size);
    let pos = Vec2::new(
        rng.random_range(area.min.x..=area.max.x),
        rng.random_range(area.min.y..=area.max.y),
    );
    Flower::new(id, pos, size, color, rng)
}
