//! Deterministic gameplay and progression engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (gates by id)
//! - No rendering or platform dependencies

pub mod course;
pub mod engine;
pub mod entity;
pub mod events;
pub mod frame;
pub mod gate;
pub mod progression;
pub mod rng;
pub mod volume;

pub use course::{Course, CourseLayout};
pub use engine::{GameEngine, TickInput};
pub use entity::{Boss, Entity, Player};
pub use events::GameEvent;
pub use frame::{BossView, FrameRenderer, FrameSnapshot, GateView, PlayerView};
pub use gate::{Gate, GateId, Polarity, ValueBounds};
pub use progression::{DifficultyRamp, ProgressionState, RoundBounds};
pub use rng::ValueGenerator;
pub use volume::BoundingVolume;
