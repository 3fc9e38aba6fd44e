//! Session controller: the menu/round state machine
//!
//! The host calls [`SessionController::tick`] once per frame with the frame
//! delta, forwards pointer and pause input, then reads the public state (or a
//! [`SessionSnapshot`]) to draw.

use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds::Playfield;
use super::clock::SessionClock;
use super::flower::Flower;
use super::particle::{self, Particle};
use super::spawn::{self, Spawner};
use super::state::{
    FlowerView, ParticleView, PointerOutcome, SessionEvent, SessionPhase, SessionSnapshot,
    UiCommand,
};
use crate::Rgb;
use crate::consts::{MAX_FLOWER_SIZE, MIN_FLOWER_SIZE, PARTICLE_BURST};
use crate::highscores::{RecordOutcome, ScoreRecord, ScoreStore};
use crate::platform::{MonotonicTime, TimeSource};
use crate::settings::Settings;
use crate::ui::{self, Button};

/// Owns one player's session: menus, the current round and the score store
pub struct SessionController {
    settings: Settings,
    field: Playfield,
    phase: SessionPhase,
    score: u64,
    /// Spawn order; the last one is on top
    flowers: Vec<Flower>,
    particles: Vec<Particle>,
    clock: SessionClock,
    /// Fixed when the round starts
    round_duration: f32,
    time: Box<dyn TimeSource>,
    scores: ScoreStore,
    spawner: Spawner,
    rng: Pcg32,
    buttons: HashMap<SessionPhase, Vec<Button>>,
    events: Vec<SessionEvent>,
    last_outcome: Option<RecordOutcome>,
    next_id: u32,
}

impl SessionController {
    /// Create a controller on the wall clock
    pub fn new(settings: Settings, scores: ScoreStore, seed: u64) -> Self {
        Self::with_time_source(settings, scores, seed, MonotonicTime::new())
    }

    /// Create a controller reading time from `time`
    pub fn with_time_source(
        settings: Settings,
        scores: ScoreStore,
        seed: u64,
        time: impl TimeSource + 'static,
    ) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(&mut rng);
        let now = time.now();
        Self {
            round_duration: settings.round_duration_secs,
            settings,
            field: Playfield::default(),
            phase: SessionPhase::Menu,
            score: 0,
            flowers: Vec::new(),
            particles: Vec::new(),
            clock: SessionClock::new(now),
            time: Box::new(time),
            scores,
            spawner,
            rng,
            buttons: HashMap::new(),
            events: Vec::new(),
            last_outcome: None,
            next_id: 1,
        }
    }

    /// Use a different playfield size
    pub fn with_playfield(mut self, field: Playfield) -> Self {
        self.field = field;
        self
    }

    // === Read-only state ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.scores.high_score()
    }

    /// Recent rounds, oldest first
    pub fn recent_scores(&self) -> impl ExactSizeIterator<Item = &ScoreRecord> + '_ {
        self.scores.recent()
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    pub fn score_store(&self) -> &ScoreStore {
        &self.scores
    }

    /// Outcome of the last finished round (cleared when a new one starts)
    pub fn last_outcome(&self) -> Option<RecordOutcome> {
        self.last_outcome
    }

    /// Game time of the current round in seconds (0 outside a round)
    pub fn elapsed(&self) -> f64 {
        if self.phase.in_round() {
            self.clock.elapsed(self.time.now())
        } else {
            0.0
        }
    }

    /// Total paused time in the current round
    pub fn paused_total(&self) -> f64 {
        self.clock.paused_total()
    }

    /// Seconds left in the round
    pub fn time_left(&self) -> f32 {
        match self.phase {
            SessionPhase::Playing | SessionPhase::Paused => {
                (self.round_duration - self.elapsed() as f32).max(0.0)
            }
            SessionPhase::GameOver => 0.0,
            _ => self.settings.round_duration_secs,
        }
    }

    /// Owned copy of everything a renderer needs this frame
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            time_left: self.time_left(),
            high_score: self.high_score(),
            recent: self.scores.recent().cloned().collect(),
            flowers: self.flowers.iter().map(FlowerView::from).collect(),
            particles: self.particles.iter().map(ParticleView::from).collect(),
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Host input ===

    /// Advance the simulation by `dt` seconds. Only does work while playing.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let elapsed = self.clock.elapsed(self.time.now()) as f32;

        if self.settings.auto_spawn {
            let difficulty = if self.settings.difficulty_ramp {
                spawn::difficulty(elapsed, self.round_duration)
            } else {
                1.0
            };
            let active = self.flowers.len();
            if self
                .spawner
                .step(dt, difficulty, active, self.settings.max_flowers, &mut self.rng)
            {
                let id = self.next_entity_id();
                let flower = spawn::random_flower(id, &self.field, &mut self.rng);
                self.flowers.push(flower);
            }
        }

        for flower in &mut self.flowers {
            flower.update(dt, &self.field);
        }
        self.flowers.retain(|f| !f.is_expired());

        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|p| !p.is_dead());

        if elapsed >= self.round_duration {
            self.finish_round();
        }
    }

    /// Pointer pressed at `pos` (playfield coordinates)
    pub fn handle_pointer_down(&mut self, pos: Vec2) -> PointerOutcome {
        match self.phase {
            SessionPhase::Playing => match self.pop_at(pos) {
                Some(id) => PointerOutcome::Popped { id },
                None => PointerOutcome::Missed,
            },
            SessionPhase::Paused => {
                self.resume();
                PointerOutcome::Resumed
            }
            phase => {
                let command = self
                    .buttons
                    .get(&phase)
                    .and_then(|buttons| ui::hit_test(buttons, pos));
                match command {
                    Some(command) if self.command(command) => PointerOutcome::Command(command),
                    _ => PointerOutcome::Ignored,
                }
            }
        }
    }

    /// Toggle between playing and paused. Returns false when not applicable.
    pub fn handle_pause_toggle(&mut self) -> bool {
        if !self.settings.enable_pause {
            return false;
        }
        match self.phase {
            SessionPhase::Playing => {
                self.pause();
                true
            }
            SessionPhase::Paused => {
                self.resume();
                true
            }
            _ => false,
        }
    }

    /// Apply a named UI command. Returns false (and does nothing) when the
    /// command does not apply to the current phase.
    pub fn command(&mut self, command: UiCommand) -> bool {
        use SessionPhase as P;
        use UiCommand as C;

        let applied = match (command, self.phase) {
            (C::StartRound, P::Menu) | (C::PlayAgain, P::GameOver) => {
                self.start_round();
                true
            }
            (C::GoToMenu, P::GameOver) => {
                self.set_phase(P::Menu);
                true
            }
            (C::OpenSettings, P::Menu) if self.settings.enable_settings_screen => {
                self.set_phase(P::Settings);
                true
            }
            (C::OpenScores, P::Menu) => {
                self.set_phase(P::ScoresView);
                true
            }
            (C::OpenCredits, P::Menu) => {
                self.set_phase(P::Credits);
                true
            }
            (C::GoBack, phase) if phase.is_info_screen() => {
                self.set_phase(P::Menu);
                true
            }
            _ => false,
        };

        if !applied {
            log::debug!("Ignoring {:?} in {:?}", command, self.phase);
        }
        applied
    }

    /// Register the button hit regions drawn on `phase`'s screen
    pub fn set_buttons(&mut self, phase: SessionPhase, buttons: Vec<Button>) {
        self.buttons.insert(phase, buttons);
    }

    /// Register the stock layout for every menu screen
    pub fn use_default_buttons(&mut self) {
        for phase in [
            SessionPhase::Menu,
            SessionPhase::GameOver,
            SessionPhase::Settings,
            SessionPhase::ScoresView,
            SessionPhase::Credits,
        ] {
            let buttons = ui::default_layout(phase, &self.field, &self.settings);
            self.set_buttons(phase, buttons);
        }
    }

    /// Replace the settings. Only allowed from the menu or settings screen.
    pub fn apply_settings(&mut self, settings: Settings) -> bool {
        if !matches!(self.phase, SessionPhase::Menu | SessionPhase::Settings) {
            return false;
        }
        self.settings = settings.sanitized();
        true
    }

    /// Put a stationary flower on the field (scripted hosts, tutorials).
    /// The position is pulled into the spawn area so the flower starts fully
    /// on screen. Returns its id, or `None` outside a running round, at the
    /// cap or for a non-finite position.
    pub fn place_flower(&mut self, pos: Vec2, size: u32, color: Rgb) -> Option<u32> {
        if self.phase != SessionPhase::Playing
            || self.flowers.len() >= self.settings.max_flowers
            || !pos.is_finite()
        {
            return None;
        }
        let size = size.clamp(MIN_FLOWER_SIZE, MAX_FLOWER_SIZE);
        let area = self.field.spawn_area(size);
        let pos = pos.clamp(area.min, area.max);
        let id = self.next_entity_id();
        self.flowers.push(Flower::stationary(id, pos, size, color));
        Some(id)
    }

    // === Transitions ===

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.events.push(SessionEvent::ScreenChanged { from, to });
        log::debug!("Phase {:?} -> {:?}", from, to);
    }

    fn start_round(&mut self) {
        self.score = 0;
        self.flowers.clear();
        self.particles.clear();
        self.round_duration = self.settings.round_duration_secs;
        self.clock.reset(self.time.now());
        self.spawner = Spawner::new(&mut self.rng);
        self.last_outcome = None;

        self.set_phase(SessionPhase::Playing);
        self.events.push(SessionEvent::RoundStarted);
        log::info!("Round started ({}s)", self.round_duration);
    }

    fn pause(&mut self) {
        self.clock.pause(self.time.now());
        self.set_phase(SessionPhase::Paused);
        self.events.push(SessionEvent::Paused);
        log::info!("Paused at {:.2}s", self.elapsed());
    }

    fn resume(&mut self) {
        self.clock.resume(self.time.now());
        self.set_phase(SessionPhase::Playing);
        self.events.push(SessionEvent::Resumed);
        log::info!("Resumed at {:.2}s", self.elapsed());
    }

    fn finish_round(&mut self) {
        let score = self.score;
        let outcome = self.scores.record(score);
        self.last_outcome = Some(outcome);
        self.flowers.clear();
        self.particles.clear();

        self.set_phase(SessionPhase::GameOver);
        self.events.push(SessionEvent::RoundOver {
            score,
            new_best: outcome.new_best,
        });
        log::info!(
            "Round over: score {} (best {}{})",
            score,
            self.scores.high_score(),
            if outcome.new_best { ", new best" } else { "" }
        );
    }

    /// Pop the top-most live flower under `pos`
    fn pop_at(&mut self, pos: Vec2) -> Option<u32> {
        let flower = self.flowers.iter_mut().rev().find(|f| f.is_hit(pos))?;
        flower.pop();
        let (id, color) = (flower.id, flower.color);

        self.score += 1;
        if self.settings.effective_particles() {
            particle::burst(&mut self.particles, pos, color, PARTICLE_BURST, &mut self.rng);
        }
        self.events.push(SessionEvent::FlowerPopped { id, pos, color });
        log::debug!("Popped flower {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        Some(id)
    }
}
