//! Menu buttons as hit regions
//!
//! The presentation layer decides where buttons are drawn and registers them
//! with the controller per screen. `default_layout` gives the stock vertical
//! menu used by the bundled demo.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Playfield, Rect, SessionPhase, UiCommand};

const BUTTON_SIZE: Vec2 = Vec2::new(240.0, 48.0);
const BUTTON_GAP: f32 = 16.0;

/// A clickable button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub region: Rect,
    pub command: UiCommand,
}

impl Button {
    pub fn new(label: impl Into<String>, region: Rect, command: UiCommand) -> Self {
        Self {
            label: label.into(),
            region,
            command,
        }
    }
}

/// Command of the first button containing `point`
pub fn hit_test(buttons: &[Button], point: Vec2) -> Option<UiCommand> {
    buttons
        .iter()
        .find(|b| b.region.contains(point))
        .map(|b| b.command)
}

/// Stock button stack for a screen, centred horizontally
pub fn default_layout(phase: SessionPhase, field: &Playfield, settings: &Settings) -> Vec<Button> {
    let entries: Vec<(&str, UiCommand)> = match phase {
        SessionPhase::Menu => {
            let mut entries = vec![("Play", UiCommand::StartRound)];
            if settings.enable_settings_screen {
                entries.push(("Settings", UiCommand::OpenSettings));
            }
            entries.push(("High Scores", UiCommand::OpenScores));
            entries.push(("Credits", UiCommand::OpenCredits));
            entries
        }
        SessionPhase::GameOver => vec![
            ("Play Again", UiCommand::PlayAgain),
            ("Main Menu", UiCommand::GoToMenu),
        ],
        SessionPhase::Settings | SessionPhase::ScoresView | SessionPhase::Credits => {
            vec![("Back", UiCommand::GoBack)]
        }
        SessionPhase::Playing | SessionPhase::Paused => Vec::new(),
    };

    let count = entries.len() as f32;
    let stack_height = count * BUTTON_SIZE.y + (count - 1.0).max(0.0) * BUTTON_GAP;
    let top = (field.height - stack_height) / 2.0;
    let left = (field.width - BUTTON_SIZE.x) / 2.0;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (label, command))| {
            let origin = Vec2::new(left, top + i as f32 * (BUTTON_SIZE.y + BUTTON_GAP));
            Button::new(label, Rect::from_origin_size(origin, BUTTON_SIZE), command)
        })
        .collect()
}
