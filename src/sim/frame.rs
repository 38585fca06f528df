//! Render-facing view of the engine
//!
//! A [`FrameSnapshot`] is everything a renderer needs for one frame. It is
//! plain data so it can cross a wasm/JS boundary or be logged as JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::gate::{Gate, GateId, Polarity};

/// Presentation hook called once per frame
pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameSnapshot);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub size: Vec3,
    pub facing: f32,
    /// Model tier to display
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub position: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateView {
    pub id: GateId,
    pub position: Vec3,
    pub size: Vec3,
    pub polarity: Polarity,
    pub color: u32,
    pub label: String,
}

impl From<&Gate> for GateView {
    fn from(gate: &Gate) -> Self {
        Self {
            id: gate.id,
            position: gate.volume.center,
            size: gate.volume.size,
            polarity: gate.polarity,
            color: gate.polarity.color(),
            label: gate.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub round: u32,
    pub score: i64,
    pub level: u32,
    pub win_threshold: i64,
    pub points_to_next_level: i64,
    /// None while the model is still loading
    pub player: Option<PlayerView>,
    pub boss: Option<BossView>,
    pub gates: Vec<GateView>,
}
