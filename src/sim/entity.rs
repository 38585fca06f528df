//! Player and boss actors

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::volume::BoundingVolume;

/// Minimal actor: a position and a fixed box size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec3,
    pub size: Vec3,
}

impl Entity {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size }
    }

    /// Collision box at the current position
    pub fn volume(&self) -> BoundingVolume {
        BoundingVolume::new(self.position, self.size)
    }
}

/// The player's vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    /// Visual model tier (mirrors progression level, cosmetic only)
    pub level: u32,
    /// Heading around the vertical axis in radians, 0 = straight down the lane
    pub facing: f32,
    /// Round start position
    start: Vec3,
    /// Forward steps taken this round
    steps: u32,
}

impl Player {
    pub fn new(start: Vec3, size: Vec3, level: u32) -> Self {
        Self {
            body: Entity::new(start, size),
            level,
            facing: 0.0,
            start,
            steps: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn volume(&self) -> BoundingVolume {
        self.body.volume()
    }

    /// Steps taken since the round started
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Move one fixed step down the lane (toward -z)
    ///
    /// Position is derived from the step count so long rounds do not
    /// accumulate float drift.
    pub fn advance(&mut self, speed: f32) {
        self.steps += 1;
        self.body.position.z = self.start.z - self.steps as f32 * speed;
    }

    /// Ease lateral position toward `target`, returning the lateral delta
    pub fn steer_toward(&mut self, target: f32, smoothing: f32) -> f32 {
        let dx = smoothing * (target - self.body.position.x);
        self.body.position.x += dx;
        dx
    }

    /// Face along the direction of travel for this tick
    pub fn face(&mut self, lateral_delta: f32, forward_delta: f32) {
        if lateral_delta == 0.0 && forward_delta == 0.0 {
            return;
        }
        self.facing = lateral_delta.atan2(forward_delta);
    }

    /// Back to the round start position
    pub fn reset(&mut self) {
        self.body.position = self.start;
        self.facing = 0.0;
        self.steps = 0;
    }
}

/// The static boss waiting at the end of the lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: Entity,
}

impl Boss {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            body: Entity::new(position, size),
        }
    }

    #[inline]
    pub fn forward_position(&self) -> f32 {
        self.body.position.z
    }

    /// Move to a new round's lane end
    pub fn place_at(&mut self, forward: f32) {
        self.body.position.z = forward;
    }
}
