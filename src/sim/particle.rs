//! Cosmetic particle bursts spawned when a flower pops

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub color: Rgb,
    /// Seconds left
    pub life: f32,
    /// Seconds at spawn
    pub max_life: f32,
}

impl Particle {
    /// Advance one tick. Velocity is per tick; only lifetime uses `dt`.
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= dt;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Remaining lifetime in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Append `count` particles at `origin`. The oldest particles are dropped
/// when needed so `particles` never grows beyond `MAX_PARTICLES`. Returns
/// how many were added.
pub fn burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: Rgb,
    count: usize,
    rng: &mut R,
) -> usize {
    let count = count.min(MAX_PARTICLES);
    let overflow = (particles.len() + count).saturating_sub(MAX_PARTICLES);
    particles.drain(..overflow);
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
        let life = rng.random_range(PARTICLE_LIFETIME_MIN..PARTICLE_LIFETIME_MAX);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life,
            max_life: life,
        });
    }
    count
}
