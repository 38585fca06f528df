//! Events emitted during a tick for presentation collaborators
//!
//! The engine queues these; the frame loop drains them after each tick to
//! update labels, swap model tiers, play effects and so on.

use serde::{Deserialize, Serialize};

use super::gate::{GateId, Polarity};
use super::progression::RoundBounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player model finished loading and was placed on the lane
    PlayerReady,
    /// Boss model finished loading and was placed at the lane end
    BossReady,
    /// A gate was consumed by the player
    GateRemoved { id: GateId, polarity: Polarity, value: u32 },
    ScoreChanged { score: i64, delta: i64 },
    /// Swap the player's model tier
    LevelChanged { level: u32 },
    RoundEnded {
        round: u32,
        won: bool,
        final_score: i64,
        /// Parameters the next round runs under
        next: RoundBounds,
    },
    /// A fresh gate set replaced the previous one
    CourseGenerated { gate_count: usize },
}
