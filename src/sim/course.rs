//! The lane: live gates for the current round
//!
//! Gates are generated in Reward/Penalty pairs at fixed forward offsets and
//! consumed by the engine on collision.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::gate::{Gate, GateId, Polarity, ValueBounds};
use crate::consts::MAX_GATE_PAIRS;
use super::rng::ValueGenerator;
use super::volume::BoundingVolume;

/// Parameters for one round's gate layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseLayout {
    /// Lateral spawn range (min_x, max_x)
    pub lateral: (f32, f32),
    pub values: ValueBounds,
    /// Far end of the lane (negative)
    pub lane_length: f32,
    /// Forward distance between pairs
    pub spacing: f32,
    pub gate_size: Vec3,
    /// Vertical position of gate centers
    pub height: f32,
    /// Boss sits this far beyond the lane end
    pub boss_gap: f32,
}

impl CourseLayout {
    /// Number of pair offsets this layout produces, or None if it is not
    /// finite or exceeds [`MAX_GATE_PAIRS`]
    pub fn offset_count(&self) -> Option<u32> {
        let offsets = (self.lane_length.abs() / self.spacing).floor();
        if !offsets.is_finite() || offsets < 0.0 || offsets > MAX_GATE_PAIRS as f32 {
            return None;
        }
        Some(offsets as u32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Live gates (sorted by id for deterministic iteration)
    gates: Vec<Gate>,
    next_id: u32,
    /// Far end of the lane (negative)
    lane_length: f32,
    boss_forward_position: f32,
}

impl Default for Course {
    fn default() -> Self {
        Self::new()
    }
}

impl Course {
    pub fn new() -> Self {
        Self {
            gates: Vec::new(),
            next_id: 1,
            lane_length: 0.0,
            boss_forward_position: 0.0,
        }
    }

    /// Allocate a new gate ID
    pub fn next_gate_id(&mut self) -> GateId {
        let id = GateId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace all gates with a fresh layout
    ///
    /// For each offset `z = -spacing, -2*spacing, ...` down to the lane end,
    /// one Reward and one Penalty gate are created with independent lateral
    /// positions and values. The boss is placed `boss_gap` past the lane end.
    pub fn generate(&mut self, layout: &CourseLayout, rng: &mut ValueGenerator) {
        self.gates.clear();
        self.lane_length = layout.lane_length;
        self.boss_forward_position = layout.lane_length - layout.boss_gap;

        let (min_x, max_x) = layout.lateral;
        // Validated settings and the capped ramp keep layouts in range
        let offsets = layout.offset_count().unwrap_or_else(|| {
            log::warn!(
                "Lane {} at spacing {} exceeds {} gate pairs, capping",
                layout.lane_length,
                layout.spacing,
                MAX_GATE_PAIRS
            );
            MAX_GATE_PAIRS
        });
        self.gates.reserve(offsets as usize * 2);

        for i in 1..=offsets {
            let z = -(i as f32) * layout.spacing;
            for polarity in [Polarity::Reward, Polarity::Penalty] {
                let x = rng.lateral(min_x, max_x);
                let id = self.next_gate_id();
                let gate = Gate::random_value(
                    id,
                    polarity,
                    Vec3::new(x, layout.height, z),
                    layout.gate_size,
                    layout.values,
                    rng,
                );
                self.gates.push(gate);
            }
        }

        log::info!(
            "Generated course: {} gates over lane {} (values {}..={})",
            self.gates.len(),
            layout.lane_length,
            layout.values.min,
            layout.values.max
        );
    }

    /// Gates whose volume overlaps `volume`, in id order
    pub fn query_collisions(&self, volume: &BoundingVolume) -> Vec<Gate> {
        self.gates
            .iter()
            .filter(|g| g.volume.intersects(volume))
            .cloned()
            .collect()
    }

    /// Remove a gate; returns the removed gate, or None if it was already gone
    pub fn remove(&mut self, id: GateId) -> Option<Gate> {
        let idx = self.gates.iter().position(|g| g.id == id)?;
        Some(self.gates.remove(idx))
    }

    /// Add a gate. A gate whose id is already live replaces the old one.
    pub fn insert(&mut self, gate: Gate) {
        self.next_id = self.next_id.max(gate.id.0 + 1);
        match self.gates.binary_search_by_key(&gate.id, |g| g.id) {
            Ok(idx) => self.gates[idx] = gate,
            Err(idx) => self.gates.insert(idx, gate),
        }
    }

    /// Far end of the lane (negative)
    pub fn lane_length(&self) -> f32 {
        self.lane_length
    }

    /// Forward position the boss occupies for this round
    pub fn boss_forward_position(&self) -> f32 {
        self.boss_forward_position
    }

    pub fn clear(&mut self) {
        self.gates.clear();
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn get(&self, id: GateId) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
