//! Score, level and difficulty state
//!
//! Two independent counters live here: the per-level threshold
//! (`points_to_next_level`) and the per-round `win_threshold`. Leveling never
//! decides a round, and a round result never changes the level.

use serde::{Deserialize, Serialize};

use super::gate::ValueBounds;
use crate::consts::MAX_GATE_PAIRS;
use crate::settings::{RampSettings, Settings};

/// Difficulty increments applied after a won round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    pub win_threshold_step: i64,
    pub lane_length_step: f32,
    pub min_value_step: u32,
    pub max_value_step: u32,
}

impl From<&RampSettings> for DifficultyRamp {
    fn from(ramp: &RampSettings) -> Self {
        Self {
            win_threshold_step: ramp.win_threshold_step,
            lane_length_step: ramp.lane_length_step,
            min_value_step: ramp.min_value_step,
            max_value_step: ramp.max_value_step,
        }
    }
}

/// Course parameters for the next round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundBounds {
    pub values: ValueBounds,
    /// Far end of the lane (negative)
    pub lane_length: f32,
    pub win_threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Round score (may go negative)
    pub score: i64,
    pub level: u32,
    pub points_to_next_level: i64,
    pub win_threshold: i64,
    pub min_gate_value: u32,
    pub max_gate_value: u32,
    /// Far end of the lane (negative)
    pub lane_length: f32,
    /// Longest lane magnitude the ramp may reach
    pub max_lane_length: f32,
    pub ramp: DifficultyRamp,
}

impl ProgressionState {
    /// Initial state from validated settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            score: 0,
            level: 1,
            points_to_next_level: settings.points_to_next_level,
            win_threshold: settings.win_threshold,
            min_gate_value: settings.min_gate_value,
            max_gate_value: settings.max_gate_value,
            lane_length: -settings.lane_length.abs(),
            max_lane_length: MAX_GATE_PAIRS as f32 * settings.spacing,
            ramp: DifficultyRamp::from(&settings.ramp),
        }
    }

    /// Apply a score change, returning the new score
    pub fn add_score(&mut self, delta: i64) -> i64 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    /// Advance one level if the score has reached the threshold
    ///
    /// The threshold grows by the new level number, so it strictly increases.
    pub fn try_level_up(&mut self) -> bool {
        if self.score < self.points_to_next_level {
            return false;
        }
        self.level += 1;
        self.points_to_next_level += self.level as i64;
        true
    }

    /// Whether the current score wins the round
    pub fn round_won(&self) -> bool {
        self.score >= self.win_threshold
    }

    /// Close the round: clear the score and, on a win, ramp the difficulty
    pub fn apply_round_result(&mut self, won: bool) -> RoundBounds {
        self.score = 0;
        if won {
            self.win_threshold = self.win_threshold.saturating_add(self.ramp.win_threshold_step);
            // Lanes stop growing once they would exceed the gate pair cap
            self.lane_length =
                (self.lane_length - self.ramp.lane_length_step).max(-self.max_lane_length);
            self.min_gate_value = self.min_gate_value.saturating_add(self.ramp.min_value_step);
            self.max_gate_value = self.max_gate_value.saturating_add(self.ramp.max_value_step);
        }
        self.bounds()
    }

    /// Current course parameters
    pub fn bounds(&self) -> RoundBounds {
        RoundBounds {
            values: ValueBounds::new(self.min_gate_value, self.max_gate_value),
            lane_length: self.lane_length,
            win_threshold: self.win_threshold,
        }
    }
}
