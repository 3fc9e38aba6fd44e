//! Game settings and preferences
//!
//! Persisted separately from scores. Also carries the feature flags that
//! select which parts of the menu shell are active.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, Storage};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Round length in seconds
    pub round_duration_secs: f32,
    /// Flowers allowed on screen at once
    pub max_flowers: usize,
    /// Spawn faster as the round goes on
    pub difficulty_ramp: bool,
    /// Spawn flowers automatically (off for scripted hosts)
    pub auto_spawn: bool,

    // === Shell features ===
    /// Pause toggle and click-to-resume
    pub enable_pause: bool,
    /// Settings entry in the main menu
    pub enable_settings_screen: bool,

    // === Visual Effects ===
    /// Particle bursts on pop
    pub particles: bool,
    /// Reduced motion (suppresses particle bursts)
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,
            max_flowers: MAX_FLOWERS_ON_SCREEN,
            difficulty_ramp: true,
            auto_spawn: true,

            enable_pause: true,
            enable_settings_screen: true,

            particles: true,
            reduced_motion: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Clamp out-of-range values into something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.round_duration_secs.is_finite() || self.round_duration_secs <= 0.0 {
            self.round_duration_secs = defaults.round_duration_secs;
        }
        self.max_flowers = self.max_flowers.max(1);
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    /// Effective particle bursts (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Final gain for sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Load settings. Missing or unreadable data gives the defaults.
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Settings>(storage) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", storage.describe());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings at {}: {}", storage.describe(), e);
                Self::default()
            }
        }
    }

    /// Save settings. Failures are logged and otherwise ignored.
    pub fn save(&self, storage: &mut dyn Storage) -> bool {
        match persistence::save_json(storage, self) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings to {}: {}", storage.describe(), e);
                false
            }
        }
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.round_duration_secs, 120.0);
        assert_eq!(s.max_flowers, 100);
        assert!(s.enable_pause);
        assert!(s.effective_particles());
    }

    #[test]
    fn test_reduced_motion_disables_particles() {
        let s = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!s.effective_particles());
    }

    #[test]
    fn test_sanitized_clamps() {
        let s = Settings {
            round_duration_secs: -5.0,
            max_flowers: 0,
            master_volume: 3.0,
            sfx_volume: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.round_duration_secs, ROUND_DURATION_SECS);
        assert_eq!(s.max_flowers, 1);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let storage = MemoryStorage::with_contents("{\"enable_pause\": false, \"max_flowers\": 5}");
        let s = Settings::load(&storage);
        assert!(!s.enable_pause);
        assert_eq!(s.max_flowers, 5);
        assert_eq!(s.round_duration_secs, ROUND_DURATION_SECS);
    }

    #[test]
    fn test_save_and_reload() {
        let mut storage = MemoryStorage::new();
        let s = Settings {
            sfx_volume: 0.25,
            enable_settings_screen: false,
            ..Default::default()
        };
        assert!(s.save(&mut storage));
        assert_eq!(Settings::load(&storage), s);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Files written by older builds may still carry a music volume
        let storage = MemoryStorage::with_contents("{\"music_volume\": 0.3, \"sfx_volume\": 0.5}");
        let s = Settings::load(&storage);
        assert_eq!(s.sfx_volume, 0.5);
        assert_eq!(s.effective_sfx_volume(), 0.8 * 0.5);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let storage = MemoryStorage::with_contents("[1, 2");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
