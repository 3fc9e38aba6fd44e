//! Session simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Delta-time driven, scaled to a 60 Hz baseline
//! - Seeded RNG only
//! - Stable iteration order (by spawn order)

pub mod bounds;
pub mod clock;
pub mod flower;
pub mod particle;
pub mod session;
pub mod spawn;
pub mod state;

pub use bounds::{Playfield, Rect};
pub use clock::SessionClock;
pub use flower::{Flower, FlowerStage};
pub use particle::Particle;
pub use session::SessionController;
pub use spawn::Spawner;
pub use state::{
    FlowerView, ParticleView, PointerOutcome, SessionEvent, SessionPhase, SessionSnapshot,
    UiCommand,
};
