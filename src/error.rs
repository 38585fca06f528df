//! Configuration errors
//!
//! The gameplay core has no runtime failures; everything here is raised while
//! loading or validating [`crate::Settings`] before an engine exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("gate spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),
    #[error("lane length must be positive and finite, got {0}")]
    InvalidLaneLength(f32),
    #[error("lane {lane_length} at spacing {spacing} needs more than {max} gate pairs")]
    TooManyGates { lane_length: f32, spacing: f32, max: u32 },
    #[error("forward speed {speed} skips gates (must be below {max} per tick)")]
    SpeedSkipsGates { speed: f32, max: f32 },
    #[error("gate lateral extent {extent} exceeds half the lane width {half_width}")]
    GatesOutOfReach { extent: f32, half_width: f32 },
    #[error("lane width must be positive and finite, got {0}")]
    InvalidLaneWidth(f32),
    #[error("gate lateral extent must be finite and non-negative, got {0}")]
    InvalidLateralExtent(f32),
    #[error("minimum gate value must be at least 1")]
    ZeroGateValue,
    #[error("gate value bounds inverted: min {min} > max {max}")]
    InvertedValueBounds { min: u32, max: u32 },
    #[error("win threshold must be positive, got {0}")]
    InvalidWinThreshold(i64),
    #[error("points to next level must be positive, got {0}")]
    InvalidLevelThreshold(i64),
    #[error("steering smoothing must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),
    #[error("forward speed must be positive and finite, got {0}")]
    InvalidForwardSpeed(f32),
    #[error("{entity} size must be positive and finite in every axis, got {size:?}")]
    InvalidSize { entity: &'static str, size: [f32; 3] },
    #[error("boss gap must be finite and non-negative, got {0}")]
    InvalidBossGap(f32),
    #[error("ride height must be finite, got {0}")]
    InvalidRideHeight(f32),
    #[error("difficulty ramp must raise the win threshold, got step {0}")]
    InvalidThresholdStep(i64),
    #[error("difficulty ramp must lengthen the lane, got step {0}")]
    InvalidLaneStep(f32),
    #[error("difficulty ramp min step {min} exceeds max step {max}")]
    InvertedValueSteps { min: u32, max: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
