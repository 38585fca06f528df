//! Gate Runner - A lane-running arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay and progression engine (gates, scoring, rounds)
//! - `settings`: Tunable configuration with construction-time validation
//! - `highscores`: Per-session table of finished rounds
//!
//! Rendering, input capture and asset loading live outside this crate. The
//! engine consumes one normalized steering signal per tick and exposes entity
//! state, a [`sim::FrameSnapshot`] and a [`sim::GameEvent`] stream.

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::{RampSettings, Settings};

/// Default tuning values
pub mod consts {
    /// Nominal frame time passed to `tick` (one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Upper bound on gate pair offsets in one course
    pub const MAX_GATE_PAIRS: u32 = 10_000;

    /// Forward distance between consecutive gate pairs
    pub const GATE_SPACING: f32 = 10.0;
    /// Initial lane length magnitude (the lane extends toward -z)
    pub const LANE_LENGTH: f32 = 50.0;
    /// Visual lane width used to map the steering signal
    pub const LANE_WIDTH: f32 = 20.0;
    /// Gates are placed laterally within [-extent, extent]
    pub const GATE_LATERAL_EXTENT: f32 = 8.0;

    /// Score needed at boss contact to win the first round
    pub const WIN_THRESHOLD: i64 = 10;
    pub const MIN_GATE_VALUE: u32 = 1;
    pub const MAX_GATE_VALUE: u32 = 5;
    pub const POINTS_TO_NEXT_LEVEL: i64 = 1;

    /// Lateral easing factor per tick (x += a * (target - x))
    pub const STEERING_SMOOTHING: f32 = 0.1;
    /// Forward distance travelled per tick
    pub const FORWARD_SPEED: f32 = 0.01;

    /// Entity sizes (w, h, d)
    pub const PLAYER_SIZE: [f32; 3] = [1.0, 1.0, 1.0];
    pub const BOSS_SIZE: [f32; 3] = [4.0, 4.0, 4.0];
    pub const GATE_SIZE: [f32; 3] = [4.0, 2.0, 0.5];
    /// Constant vertical position of everything on the lane
    pub const RIDE_HEIGHT: f32 = 0.5;

    /// Difficulty ramp applied after a won round
    pub const WIN_THRESHOLD_STEP: i64 = 5;
    pub const LANE_LENGTH_STEP: f32 = 10.0;
    pub const MIN_VALUE_STEP: u32 = 0;
    pub const MAX_VALUE_STEP: u32 = 2;
}

/// Normalize a pointer x coordinate to a steering signal in [0, 1]
///
/// Degenerate viewports map to the lane center.
#[inline]
pub fn pointer_to_steering(pointer_x: f32, viewport_width: f32) -> f32 {
    if viewport_width <= 0.0 || !viewport_width.is_finite() {
        return 0.5;
    }
    (pointer_x / viewport_width).clamp(0.0, 1.0)
}

/// Map a steering signal to a lateral target within the lane's visual width
///
/// `target = signal * width - width / 2`, with the signal clamped to [0, 1].
#[inline]
pub fn steering_to_lateral(signal: f32, lane_width: f32) -> f32 {
    signal.clamp(0.0, 1.0) * lane_width - lane_width / 2.0
}
