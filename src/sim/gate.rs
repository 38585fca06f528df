//! Gates: valued, polarity-tagged obstacles on the lane

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::ValueGenerator;
use super::volume::BoundingVolume;

/// Whether passing a gate adds or subtracts its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Reward,
    Penalty,
}

impl Polarity {
    /// Apply polarity to a magnitude
    pub fn signed(self, value: u32) -> i64 {
        match self {
            Polarity::Reward => value as i64,
            Polarity::Penalty => -(value as i64),
        }
    }

    /// Display colour (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            Polarity::Reward => 0x00ff00,
            Polarity::Penalty => 0xff0000,
        }
    }
}

/// Stable gate handle, unique within a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GateId(pub u32);

/// Inclusive range for gate magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: u32,
    pub max: u32,
}

impl ValueBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: GateId,
    pub polarity: Polarity,
    /// Magnitude; scoring applies the polarity's sign
    pub value: u32,
    pub volume: BoundingVolume,
}

impl Gate {
    /// Gate with an explicit value
    pub fn fixed_value(id: GateId, polarity: Polarity, position: Vec3, size: Vec3, value: u32) -> Self {
        Self {
            id,
            polarity,
            value,
            volume: BoundingVolume::new(position, size),
        }
    }

    /// Gate with a value drawn uniformly from `bounds`
    pub fn random_value(
        id: GateId,
        polarity: Polarity,
        position: Vec3,
        size: Vec3,
        bounds: ValueBounds,
        rng: &mut ValueGenerator,
    ) -> Self {
        let value = rng.value(bounds.min, bounds.max);
        Self::fixed_value(id, polarity, position, size, value)
    }

    #[inline]
    pub fn lateral_position(&self) -> f32 {
        self.volume.center.x
    }

    #[inline]
    pub fn forward_position(&self) -> f32 {
        self.volume.center.z
    }

    /// Score change when the player passes through
    pub fn score_delta(&self) -> i64 {
        self.polarity.signed(self.value)
    }

    /// Text for the value label ("+3" / "-3")
    pub fn label(&self) -> String {
        format!("{:+}", self.score_delta())
    }
}
