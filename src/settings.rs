//! Game settings and tuning
//!
//! Every value has a default from [`crate::consts`]; any subset can be
//! overridden from JSON. Validation happens once, before an engine is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty increments applied after a won round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampSettings {
    /// Added to the win threshold
    pub win_threshold_step: i64,
    /// Added to the lane length magnitude
    pub lane_length_step: f32,
    /// Added to the minimum gate value
    pub min_value_step: u32,
    /// Added to the maximum gate value
    pub max_value_step: u32,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            win_threshold_step: WIN_THRESHOLD_STEP,
            lane_length_step: LANE_LENGTH_STEP,
            min_value_step: MIN_VALUE_STEP,
            max_value_step: MAX_VALUE_STEP,
        }
    }
}

/// Initial values for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Course ===
    /// Forward distance between gate pairs
    pub spacing: f32,
    /// Initial lane length magnitude
    pub lane_length: f32,
    /// Visual lane width (steering maps onto this)
    pub lane_width: f32,
    /// Gates spawn laterally within [-extent, extent]
    pub gate_lateral_extent: f32,

    // === Scoring ===
    pub win_threshold: i64,
    pub min_gate_value: u32,
    pub max_gate_value: u32,
    pub points_to_next_level: i64,

    // === Movement ===
    /// Lateral easing factor per tick
    pub smoothing: f32,
    /// Forward distance per tick
    pub forward_speed: f32,

    // === Entities ===
    pub player_size: [f32; 3],
    pub boss_size: [f32; 3],
    pub gate_size: [f32; 3],
    pub ride_height: f32,
    /// Boss sits this far beyond the lane end
    pub boss_gap: f32,

    pub ramp: RampSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spacing: GATE_SPACING,
            lane_length: LANE_LENGTH,
            lane_width: LANE_WIDTH,
            gate_lateral_extent: GATE_LATERAL_EXTENT,

            win_threshold: WIN_THRESHOLD,
            min_gate_value: MIN_GATE_VALUE,
            max_gate_value: MAX_GATE_VALUE,
            points_to_next_level: POINTS_TO_NEXT_LEVEL,

            smoothing: STEERING_SMOOTHING,
            forward_speed: FORWARD_SPEED,

            player_size: PLAYER_SIZE,
            boss_size: BOSS_SIZE,
            gate_size: GATE_SIZE,
            ride_height: RIDE_HEIGHT,
            boss_gap: 0.0,

            ramp: RampSettings::default(),
        }
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a template config)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that would produce undefined courses or a
    /// non-monotone difficulty ramp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.spacing) {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if !positive(self.lane_length) {
            return Err(ConfigError::InvalidLaneLength(self.lane_length));
        }
        if (self.lane_length / self.spacing).floor() > MAX_GATE_PAIRS as f32 {
            return Err(ConfigError::TooManyGates {
                lane_length: self.lane_length,
                spacing: self.spacing,
                max: MAX_GATE_PAIRS,
            });
        }
        if !positive(self.lane_width) {
            return Err(ConfigError::InvalidLaneWidth(self.lane_width));
        }
        if !self.gate_lateral_extent.is_finite() || self.gate_lateral_extent < 0.0 {
            return Err(ConfigError::InvalidLateralExtent(self.gate_lateral_extent));
        }
        if self.min_gate_value == 0 {
            return Err(ConfigError::ZeroGateValue);
        }
        if self.min_gate_value > self.max_gate_value {
            return Err(ConfigError::InvertedValueBounds {
                min: self.min_gate_value,
                max: self.max_gate_value,
            });
        }
        if self.win_threshold <= 0 {
            return Err(ConfigError::InvalidWinThreshold(self.win_threshold));
        }
        if self.points_to_next_level <= 0 {
            return Err(ConfigError::InvalidLevelThreshold(self.points_to_next_level));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }
        if !positive(self.forward_speed) {
            return Err(ConfigError::InvalidForwardSpeed(self.forward_speed));
        }
        for (entity, size) in [
            ("player", self.player_size),
            ("boss", self.boss_size),
            ("gate", self.gate_size),
        ] {
            if !size.iter().all(|&s| positive(s)) {
                return Err(ConfigError::InvalidSize { entity, size });
            }
        }
        // A step longer than the combined depth can jump clean over a gate
        let max_speed = self.gate_size[2] + self.player_size[2];
        if self.forward_speed >= max_speed {
            return Err(ConfigError::SpeedSkipsGates {
                speed: self.forward_speed,
                max: max_speed,
            });
        }
        let half_width = self.lane_width / 2.0;
        if self.gate_lateral_extent > half_width {
            return Err(ConfigError::GatesOutOfReach {
                extent: self.gate_lateral_extent,
                half_width,
            });
        }
        if !self.ride_height.is_finite() {
            return Err(ConfigError::InvalidRideHeight(self.ride_height));
        }
        if !self.boss_gap.is_finite() || self.boss_gap < 0.0 {
            return Err(ConfigError::InvalidBossGap(self.boss_gap));
        }
        if self.ramp.win_threshold_step <= 0 {
            return Err(ConfigError::InvalidThresholdStep(self.ramp.win_threshold_step));
        }
        if !positive(self.ramp.lane_length_step) {
            return Err(ConfigError::InvalidLaneStep(self.ramp.lane_length_step));
        }
        if self.ramp.min_value_step > self.ramp.max_value_step {
            return Err(ConfigError::InvertedValueSteps {
                min: self.ramp.min_value_step,
                max: self.ramp.max_value_step,
            });
        }
        Ok(())
    }
}
