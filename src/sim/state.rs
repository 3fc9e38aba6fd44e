//! Session phases, commands, events and the read-only views handed to
//! renderers and audio.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flower::{Flower, FlowerStage};
use super::particle::Particle;
use crate::Rgb;
use crate::highscores::ScoreRecord;

/// Current screen / phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title menu
    #[default]
    Menu,
    /// Round running
    Playing,
    /// Round frozen
    Paused,
    /// Round finished, final score shown
    GameOver,
    /// Settings screen (from Menu only)
    Settings,
    /// High score browser (from Menu only)
    ScoresView,
    /// Credits (from Menu only)
    Credits,
}

impl SessionPhase {
    /// Informational leaf screens hanging off the menu
    pub fn is_info_screen(&self) -> bool {
        matches!(
            self,
            SessionPhase::Settings | SessionPhase::ScoresView | SessionPhase::Credits
        )
    }

    /// A round exists (running or paused)
    pub fn in_round(&self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::Paused)
    }
}

/// Named commands issued by the presentation layer's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiCommand {
    StartRound,
    PlayAgain,
    GoToMenu,
    OpenSettings,
    OpenScores,
    OpenCredits,
    GoBack,
}

/// Something that happened this frame, for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    RoundStarted,
    FlowerPopped { id: u32, pos: Vec2, color: Rgb },
    Paused,
    Resumed,
    RoundOver { score: u64, new_best: bool },
    ScreenChanged { from: SessionPhase, to: SessionPhase },
}

/// What a pointer-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A flower was popped
    Popped { id: u32 },
    /// Round running, nothing under the pointer
    Missed,
    /// Click while paused resumed the round
    Resumed,
    /// A button was pressed and its command applied
    Command(UiCommand),
    /// Nothing to do
    Ignored,
}

/// Flower data for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowerView {
    pub id: u32,
    pub pos: Vec2,
    pub size: u32,
    pub color: Rgb,
    pub stage: FlowerStage,
    /// Pop animation progress in [0, 1]
    pub pop_progress: f32,
}

impl From<&Flower> for FlowerView {
    fn from(f: &Flower) -> Self {
        Self {
            id: f.id,
            pos: f.pos,
            size: f.size,
            color: f.color,
            stage: f.stage,
            pop_progress: f.pop_progress(),
        }
    }
}

/// Particle data for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Rgb,
    /// Remaining lifetime in [0, 1]
    pub life: f32,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            color: p.color,
            life: p.life_fraction(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub time_left: f32,
    pub high_score: u64,
    /// Oldest first
    pub recent: Vec<ScoreRecord>,
    /// Spawn order, last drawn on top
    pub flowers: Vec<FlowerView>,
    pub particles: Vec<ParticleView>,
}
