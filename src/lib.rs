//! Joy Blooms - a timed flower-popping arcade clicker
//!
//! Core modules:
//! - `sim`: Session state machine, flower/particle simulation, round clock
//! - `highscores`: Best score and recent-round history
//! - `persistence`: Storage backends for scores and settings
//! - `platform`: Time sources
//! - `settings`: Player preferences and feature flags
//! - `ui`: Button hit regions for the menu screens
//! - `audio`: Sound cues derived from session events

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::{ScoreRecord, ScoreStore};
pub use settings::Settings;
pub use sim::SessionController;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use super::Rgb;

    /// Physics constants are tuned per frame at this update rate
    pub const BASELINE_HZ: f32 = 60.0;
    /// Longest drift step, so a slow frame cannot skip past a bounce
    pub const DRIFT_STEP_SECS: f32 = 1.0 / BASELINE_HZ;
    /// Maximum drift substeps per update to bound the work after a stall
    pub const MAX_DRIFT_SUBSTEPS: u32 = 600;

    /// Default round length
    pub const ROUND_DURATION_SECS: f32 = 120.0;

    /// Playfield defaults
    pub const PLAYFIELD_WIDTH: f32 = 960.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Band at the top reserved for the score/time HUD; nothing spawns there
    pub const HUD_HEIGHT: f32 = 40.0;

    /// Flower size range ("pixel" cell units)
    pub const MIN_FLOWER_SIZE: u32 = 14;
    pub const MAX_FLOWER_SIZE: u32 = 26;
    /// Hit region side is this many cells (plus-shaped flower is 3x3)
    pub const FLOWER_EXTENT_CELLS: f32 = 3.0;
    /// Bounce margin in cells
    pub const FLOWER_MARGIN_CELLS: f32 = 2.0;
    pub const MAX_FLOWERS_ON_SCREEN: usize = 100;

    /// Drift speed range (pixels per baseline frame)
    pub const DRIFT_SPEED_MIN: f32 = 0.1;
    pub const DRIFT_SPEED_MAX: f32 = 0.35;
    /// Wobble tuning
    pub const WOBBLE_SPEED_MIN: f32 = 0.01;
    pub const WOBBLE_SPEED_MAX: f32 = 0.03;
    pub const WOBBLE_AMP_MIN: f32 = 0.5;
    pub const WOBBLE_AMP_MAX: f32 = 2.0;
    pub const WOBBLE_SCALE: f32 = 0.02;

    /// Pop animation length
    pub const POP_DURATION_SECS: f32 = 0.25;

    /// Spawn pacing (milliseconds between spawns, scaled down by difficulty)
    pub const SPAWN_EVERY_MIN_MS: f32 = 250.0;
    pub const SPAWN_EVERY_MAX_MS: f32 = 550.0;
    pub const SPAWN_FLOOR_MS: f32 = 120.0;
    /// Extra spawn rate reached by the end of a round
    pub const DIFFICULTY_RAMP: f32 = 1.5;

    /// Particles per pop
    pub const PARTICLE_BURST: usize = 12;
    pub const MAX_PARTICLES: usize = 256;
    /// Added to particle vertical velocity every tick
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    pub const PARTICLE_SPEED_MIN: f32 = 1.5;
    pub const PARTICLE_SPEED_MAX: f32 = 4.0;
    pub const PARTICLE_LIFETIME_MIN: f32 = 0.4;
    pub const PARTICLE_LIFETIME_MAX: f32 = 0.8;

    /// Recent rounds kept in the score history
    pub const MAX_RECENT_SCORES: usize = 10;

    /// Pastel flower palette
    pub const FLOWER_PALETTE: [Rgb; 5] = [
        Rgb([255, 183, 197]), // pink
        Rgb([255, 221, 148]), // peach
        Rgb([182, 255, 182]), // mint
        Rgb([173, 216, 255]), // light blue
        Rgb([220, 200, 255]), // lavender
    ];
}

/// Opaque RGB color, passed through to renderers untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Default for Rgb {
    fn default() -> Self {
        consts::FLOWER_PALETTE[0]
    }
}

/// Scale a per-second delta to baseline frames
#[inline]
pub fn baseline_frames(dt: f32) -> f32 {
    dt * consts::BASELINE_HZ
}
