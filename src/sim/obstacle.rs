//! Obstacles and the spawner that feeds them in from the right edge

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::assets::{AssetRegistry, SpriteId};
use crate::tuning::Tuning;

/// Obstacle types. Both share geometry and movement; they differ in
/// placement and in which sprite draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Brick wall standing on the floor
    Ground,
    /// Enemy hovering at a fixed band above the floor
    Flying,
}

impl ObstacleKind {
    pub fn sprite(self) -> SpriteId {
        match self {
            ObstacleKind::Ground => SpriteId::Brick,
            ObstacleKind::Flying => SpriteId::FlyingEnemy,
        }
    }

    /// Sprite-derived size, or the fixed fallback while the sprite is loading
    pub fn size(self, tuning: &Tuning, assets: &AssetRegistry) -> Vec2 {
        let (w, h) = assets.sprite_size(self.sprite()).unwrap_or(match self {
            ObstacleKind::Ground => tuning.ground_fallback_size,
            ObstacleKind::Flying => tuning.flying_fallback_size,
        });
        Vec2::new(w, h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// New obstacle at the right edge of the field
    pub fn spawn(kind: ObstacleKind, tuning: &Tuning, assets: &AssetRegistry) -> Self {
        let size = kind.size(tuning, assets);
        let y = match kind {
            ObstacleKind::Ground => tuning.field_height - size.y,
            ObstacleKind::Flying => tuning.field_height - tuning.flying_clearance,
        };
        Self {
            pos: Vec2::new(tuning.field_width, y),
            size,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Scroll left by the current game speed
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Right edge has passed the left boundary
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Spawn clock: one roll every `spawn_interval + 1` ticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub timer: u32,
}

impl Spawner {
    /// Count one tick; on a roll, maybe pick a kind
    pub fn tick<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) -> Option<ObstacleKind> {
        self.timer += 1;
        if self.timer <= tuning.spawn_interval {
            return None;
        }
        self.timer = 0;

        if rng.random::<f32>() >= tuning.spawn_chance {
            return None;
        }
        if rng.random::<f32>() < tuning.flying_chance {
            Some(ObstacleKind::Flying)
        } else {
            Some(ObstacleKind::Ground)
        }
    }
}
