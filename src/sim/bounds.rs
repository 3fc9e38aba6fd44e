//! Axis-aligned geometry for hit regions and the playfield
//!
//! Screen coordinates: origin at the top-left, +y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned rectangle (min inclusive, max inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Square of the given side length centred on `center`
    pub fn centered(center: Vec2, side: f32) -> Self {
        let half = Vec2::splat(side / 2.0);
        Self::new(center - half, center + half)
    }

    /// Rectangle from top-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Point-in-rect test, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// The area flowers live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Top band kept clear of new spawns
    pub hud_height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            hud_height: HUD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            hud_height: HUD_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect().contains(point)
    }

    /// Region a flower of `size` may spawn its center in, so its whole
    /// extent starts on screen and below the HUD. Collapses to the middle
    /// of the playfield when the flower is too big to fit.
    pub fn spawn_area(&self, size: u32) -> Rect {
        let inset = size as f32 * FLOWER_EXTENT_CELLS;
        let min = Vec2::new(inset, self.hud_height + inset);
        let max = Vec2::new(self.width - inset, self.height - inset);
        if min.x > max.x || min.y > max.y {
            let mid = Vec2::new(self.width / 2.0, (self.hud_height + self.height) / 2.0);
            return Rect::new(mid, mid);
        }
        Rect::new(min, max)
    }

    /// Region a flower's center bounces inside
    pub fn bounce_area(&self, size: u32) -> Rect {
        let margin = size as f32 * FLOWER_MARGIN_CELLS;
        Rect {
            min: Vec2::splat(margin),
            max: Vec2::new(self.width - margin, self.height - margin),
        }
    }
}
