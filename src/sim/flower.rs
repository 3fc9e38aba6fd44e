//! Flower entities: drift, wobble, bounce and the pop animation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Playfield, Rect};
use crate::consts::*;
use crate::{Rgb, baseline_frames};

/// Lifecycle stage of a flower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlowerStage {
    /// Drifting and clickable
    Alive,
    /// Playing the pop animation (seconds since the click)
    Popping { elapsed: f32 },
    /// Animation finished, removed at the end of the tick
    Expired,
}

/// A single floating flower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flower {
    /// Spawn order; higher ids are drawn on top
    pub id: u32,
    pub pos: Vec2,
    /// Cell size in pixels
    pub size: u32,
    pub color: Rgb,
    /// Drift in pixels per baseline frame
    pub vel: Vec2,
    pub wobble_phase: f32,
    pub wobble_speed: f32,
    pub wobble_amp: f32,
    pub stage: FlowerStage,
    /// Hit region, follows `pos`
    pub region: Rect,
}

impl Flower {
    /// Create a flower with a random drift heading and wobble
    pub fn new<R: Rng + ?Sized>(id: u32, pos: Vec2, size: u32, color: Rgb, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(DRIFT_SPEED_MIN..DRIFT_SPEED_MAX);

        let mut flower = Self::stationary(id, pos, size, color);
        flower.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        flower.wobble_phase = rng.random_range(0.0..1000.0);
        flower.wobble_speed = rng.random_range(WOBBLE_SPEED_MIN..WOBBLE_SPEED_MAX);
        flower.wobble_amp = rng.random_range(WOBBLE_AMP_MIN..WOBBLE_AMP_MAX);
        flower
    }

    /// Create a flower that stays where it is put
    pub fn stationary(id: u32, pos: Vec2, size: u32, color: Rgb) -> Self {
        let size = size.clamp(MIN_FLOWER_SIZE, MAX_FLOWER_SIZE);
        Self {
            id,
            pos,
            size,
            color,
            vel: Vec2::ZERO,
            wobble_phase: 0.0,
            wobble_speed: 0.0,
            wobble_amp: 0.0,
            stage: FlowerStage::Alive,
            region: Self::region_at(pos, size),
        }
    }

    fn region_at(pos: Vec2, size: u32) -> Rect {
        Rect::centered(pos, size as f32 * FLOWER_EXTENT_CELLS)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stage == FlowerStage::Alive
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.stage == FlowerStage::Expired
    }

    /// Whether a click at `point` would pop this flower
    pub fn is_hit(&self, point: Vec2) -> bool {
        self.is_alive() && self.region.contains(point)
    }

    /// Start the pop animation. Returns false if the flower was not alive.
    pub fn pop(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.stage = FlowerStage::Popping { elapsed: 0.0 };
        true
    }

    /// Pop animation progress in [0, 1] (0 while alive, 1 once expired)
    pub fn pop_progress(&self) -> f32 {
        match self.stage {
            FlowerStage::Alive => 0.0,
            FlowerStage::Popping { elapsed } => (elapsed / POP_DURATION_SECS).min(1.0),
            FlowerStage::Expired => 1.0,
        }
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32, field: &Playfield) {
        match self.stage {
            FlowerStage::Alive => {
                let mut remaining = dt;
                let mut substeps = 0;
                while remaining > 0.0 && substeps < MAX_DRIFT_SUBSTEPS {
                    let step = remaining.min(DRIFT_STEP_SECS);
                    self.drift(step, field);
                    remaining -= step;
                    substeps += 1;
                }
            }
            FlowerStage::Popping { elapsed } => {
                let elapsed = elapsed + dt;
                self.stage = if elapsed >= POP_DURATION_SECS {
                    FlowerStage::Expired
                } else {
                    FlowerStage::Popping { elapsed }
                };
            }
            FlowerStage::Expired => {}
        }
    }

    fn drift(&mut self, dt: f32, field: &Playfield) {
        let frames = baseline_frames(dt);

        self.wobble_phase += self.wobble_speed * frames;
        let wobble = Vec2::new(
            self.wobble_phase.sin() * self.wobble_amp,
            (self.wobble_phase * 0.8).cos() * self.wobble_amp,
        );

        self.pos += (self.vel + wobble * WOBBLE_SCALE) * frames;

        // Soft bounce: point the velocity back inside, keep the speed
        let bounds = field.bounce_area(self.size);
        if self.pos.x < bounds.min.x {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > bounds.max.x {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < bounds.min.y {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > bounds.max.y {
            self.vel.y = -self.vel.y.abs();
        }

        self.region = Self::region_at(self.pos, self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_size_clamped_at_creation() {
        let small = Flower::stationary(1, Vec2::new(100.0, 100.0), 2, Rgb::default());
        let big = Flower::stationary(2, Vec2::new(100.0, 100.0), 99, Rgb::default());
        assert_eq!(small.size, MIN_FLOWER_SIZE);
        assert_eq!(big.size, MAX_FLOWER_SIZE);
    }

    #[test]
    fn test_random_flower_within_tuning() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..50 {
            let f = Flower::new(id, Vec2::new(200.0, 200.0), 20, Rgb::default(), &mut rng);
            let speed = f.vel.length();
            assert!(speed >= DRIFT_SPEED_MIN - 1e-4 && speed <= DRIFT_SPEED_MAX + 1e-4);
            assert!(f.wobble_amp >= WOBBLE_AMP_MIN && f.wobble_amp < WOBBLE_AMP_MAX);
            assert!(f.is_alive());
        }
    }

    #[test]
    fn test_drift_moves_at_baseline_rate() {
        let field = Playfield::default();
        let mut f = Flower::stationary(1, Vec2::new(300.0, 300.0), 20, Rgb::default());
        f.vel = Vec2::new(0.3, 0.0);

        // One second at 60 Hz and at 240 Hz end up in the same place
        let mut g = f.clone();
        for _ in 0..60 {
            f.update(DT, &field);
        }
        for _ in 0..240 {
            g.update(DT / 4.0, &field);
        }
        assert!((f.pos.x - 318.0).abs() < 1e-2);
        assert!((f.pos - g.pos).length() < 1e-2);
        assert_eq!(f.region, Rect::centered(f.pos, 60.0));
    }

    #[test]
    fn test_bounce_flips_direction_keeps_speed() {
        let field = Playfield::default();
        let margin = 20.0 * FLOWER_MARGIN_CELLS;
        let mut f = Flower::stationary(1, Vec2::new(margin + 0.1, 300.0), 20, Rgb::default());
        f.vel = Vec2::new(-0.3, 0.2);

        f.update(DT, &field);
        assert!(f.vel.x > 0.0);
        assert!((f.vel.x - 0.3).abs() < 1e-6);
        assert_eq!(f.vel.y, 0.2);

        // Still outside on the next tick: direction stays inward
        f.pos.x = margin - 5.0;
        f.update(DT, &field);
        assert!(f.vel.x > 0.0);
    }

    #[test]
    fn test_long_frame_still_bounces() {
        let field = Playfield::default();
        let mut f = Flower::stationary(1, Vec2::new(40.0, 300.0), 14, Rgb::default());
        f.vel = Vec2::new(-0.35, 0.0);

        // Three seconds in one call covers far more than the 28 px margin
        f.update(3.0, &field);
        assert!(field.contains(f.pos), "left the playfield at {:?}", f.pos);
        assert!(f.vel.x > 0.0);
        assert_eq!(f.region, Rect::centered(f.pos, 14.0 * FLOWER_EXTENT_CELLS));
    }

    #[test]
    fn test_long_frame_matches_small_frames() {
        let field = Playfield::default();
        let mut f = Flower::stationary(1, Vec2::new(40.0, 300.0), 14, Rgb::default());
        f.vel = Vec2::new(-0.35, 0.1);
        let mut g = f.clone();

        f.update(2.0, &field);
        for _ in 0..120 {
            g.update(DT, &field);
        }
        assert!((f.pos - g.pos).length() < 1e-2);
        assert_eq!(f.vel, g.vel);
    }

    #[test]
    fn test_stall_drift_is_bounded() {
        let field = Playfield::default();
        let mut f = Flower::stationary(1, Vec2::new(300.0, 300.0), 20, Rgb::default());
        f.vel = Vec2::new(0.1, 0.0);

        // Anything past the substep budget is dropped
        f.update(1.0e6, &field);
        let max_travel = 0.1 * MAX_DRIFT_SUBSTEPS as f32;
        assert!((f.pos.x - (300.0 + max_travel)).abs() < 1e-2);
    }

    #[test]
    fn test_pop_only_once() {
        let mut f = Flower::stationary(1, Vec2::new(100.0, 100.0), 14, Rgb::default());
        assert!(f.pop());
        assert!(!f.pop());
        assert!(!f.is_hit(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_popping_freezes_motion_and_expires() {
        let field = Playfield::default();
        let mut f = Flower::stationary(1, Vec2::new(300.0, 300.0), 20, Rgb::default());
        f.vel = Vec2::new(0.3, 0.3);
        f.pop();

        f.update(0.1, &field);
        assert_eq!(f.pos, Vec2::new(300.0, 300.0));
        assert!((f.pop_progress() - 0.4).abs() < 1e-5);

        f.update(0.1, &field);
        assert!(!f.is_expired());
        f.update(0.06, &field);
        assert!(f.is_expired());
        assert_eq!(f.pop_progress(), 1.0);
    }
}
