//! Sound cues for session events
//!
//! Procedurally described sound effects - no external files needed. The host
//! audio backend turns each [`Cue`] into an oscillator with a gain envelope.

use crate::settings::Settings;
use crate::sim::SessionEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Flower popped
    Pop,
    /// Round begins
    RoundStart,
    /// Round paused
    Pause,
    /// Round resumed
    Resume,
    /// Round ended
    RoundOver,
    /// Round ended on a new best score
    HighScore,
    /// Menu navigation
    UiClick,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// One oscillator sweep with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_secs: f32,
    /// Peak gain before volume scaling
    pub peak: f32,
}

/// Pentatonic steps so rapid pops form a tune rather than one pitch
const POP_SCALE_HZ: [f32; 5] = [523.25, 587.33, 659.25, 783.99, 880.0];

impl SoundEffect {
    /// Map a session event to its sound, if it has one
    pub fn for_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::FlowerPopped { .. } => Some(SoundEffect::Pop),
            SessionEvent::RoundStarted => Some(SoundEffect::RoundStart),
            SessionEvent::Paused => Some(SoundEffect::Pause),
            SessionEvent::Resumed => Some(SoundEffect::Resume),
            SessionEvent::RoundOver { new_best: true, .. } => Some(SoundEffect::HighScore),
            SessionEvent::RoundOver { .. } => Some(SoundEffect::RoundOver),
            // Round transitions already have their own sounds
            SessionEvent::ScreenChanged { from, to } => {
                (!from.in_round() && !to.in_round()).then_some(SoundEffect::UiClick)
            }
        }
    }

    /// Tone description. `variant` picks the pitch for pops.
    pub fn tone(&self, variant: u32) -> Tone {
        match self {
            SoundEffect::Pop => {
                let hz = POP_SCALE_HZ[variant as usize % POP_SCALE_HZ.len()];
                Tone {
                    waveform: Waveform::Sine,
                    start_hz: hz,
                    end_hz: hz * 1.5,
                    duration_secs: 0.12,
                    peak: 0.5,
                }
            }
            SoundEffect::RoundStart => Tone {
                waveform: Waveform::Triangle,
                start_hz: 330.0,
                end_hz: 660.0,
                duration_secs: 0.3,
                peak: 0.4,
            },
            SoundEffect::Pause => Tone {
                waveform: Waveform::Sine,
                start_hz: 440.0,
                end_hz: 220.0,
                duration_secs: 0.15,
                peak: 0.3,
            },
            SoundEffect::Resume => Tone {
                waveform: Waveform::Sine,
                start_hz: 220.0,
                end_hz: 440.0,
                duration_secs: 0.15,
                peak: 0.3,
            },
            SoundEffect::RoundOver => Tone {
                waveform: Waveform::Triangle,
                start_hz: 392.0,
                end_hz: 196.0,
                duration_secs: 0.6,
                peak: 0.5,
            },
            SoundEffect::HighScore => Tone {
                waveform: Waveform::Square,
                start_hz: 523.25,
                end_hz: 1046.5,
                duration_secs: 0.8,
                peak: 0.35,
            },
            SoundEffect::UiClick => Tone {
                waveform: Waveform::Square,
                start_hz: 800.0,
                end_hz: 800.0,
                duration_secs: 0.04,
                peak: 0.2,
            },
        }
    }
}

/// A sound ready to be played at `gain`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub tone: Tone,
    pub gain: f32,
}

/// Turns drained session events into cues at the player's volume
#[derive(Debug, Clone)]
pub struct AudioCues {
    sfx_gain: f32,
    muted: bool,
    pops: u32,
}

impl AudioCues {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sfx_gain: settings.effective_sfx_volume(),
            muted: false,
            pops: 0,
        }
    }

    /// Pick up new volume settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.effective_sfx_volume();
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_gain }
    }

    /// Cues for this frame's events, in event order
    pub fn cues(&mut self, events: &[SessionEvent]) -> Vec<Cue> {
        let vol = self.effective_volume();
        let mut cues = Vec::new();
        for event in events {
            if matches!(event, SessionEvent::RoundStarted) {
                self.pops = 0;
            }
            let Some(effect) = SoundEffect::for_event(event) else {
                continue;
            };
            let variant = if effect == SoundEffect::Pop {
                self.pops = self.pops.wrapping_add(1);
                self.pops - 1
            } else {
                0
            };
            if vol <= 0.0 {
                continue;
            }
            let tone = effect.tone(variant);
            cues.push(Cue {
                effect,
                tone,
                gain: tone.peak * vol,
            });
        }
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;
    use crate::sim::SessionPhase;
    use glam::Vec2;

    fn popped(id: u32) -> SessionEvent {
        SessionEvent::FlowerPopped {
            id,
            pos: Vec2::ZERO,
            color: Rgb::default(),
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&popped(1)), Some(SoundEffect::Pop));
        assert_eq!(
            SoundEffect::for_event(&SessionEvent::RoundOver {
                score: 3,
                new_best: true
            }),
            Some(SoundEffect::HighScore)
        );
        assert_eq!(
            SoundEffect::for_event(&SessionEvent::RoundOver {
                score: 3,
                new_best: false
            }),
            Some(SoundEffect::RoundOver)
        );
        let menu_move = SessionEvent::ScreenChanged {
            from: SessionPhase::Menu,
            to: SessionPhase::Credits,
        };
        assert_eq!(SoundEffect::for_event(&menu_move), Some(SoundEffect::UiClick));
        let round_start = SessionEvent::ScreenChanged {
            from: SessionPhase::Menu,
            to: SessionPhase::Playing,
        };
        assert_eq!(SoundEffect::for_event(&round_start), None);
    }

    #[test]
    fn test_pop_pitch_climbs_the_scale() {
        let mut audio = AudioCues::new(&Settings::default());
        let cues = audio.cues(&[popped(1), popped(2), popped(3)]);
        assert_eq!(cues.len(), 3);
        assert!(cues[0].tone.start_hz < cues[1].tone.start_hz);
        assert!(cues[1].tone.start_hz < cues[2].tone.start_hz);

        // A new round starts from the bottom again
        let cues = audio.cues(&[SessionEvent::RoundStarted, popped(4)]);
        assert_eq!(cues[1].tone.start_hz, POP_SCALE_HZ[0]);
    }

    #[test]
    fn test_volume_scaling_and_mute() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let mut audio = AudioCues::new(&settings);
        let cues = audio.cues(&[popped(1)]);
        assert!((cues[0].gain - 0.5 * 0.25).abs() < 1e-6);

        audio.set_muted(true);
        assert!(audio.cues(&[popped(2)]).is_empty());
    }
}
