//! Session round leaderboard
//!
//! Tracks the best finished rounds for the lifetime of one engine. Nothing is
//! written to storage.

use serde::{Deserialize, Serialize};

/// Maximum number of rounds to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Score at boss contact
    pub score: i64,
    /// Round number (1-based)
    pub round: u32,
    pub won: bool,
}

/// Best rounds, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RoundRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished round; returns the rank achieved or None
    ///
    /// Ties keep the earlier round ahead.
    pub fn add_round(&mut self, score: i64, round: u32, won: bool) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = RoundRecord { score, round, won };

        // Find insertion point (sorted descending by score)
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Number of recorded rounds that were won
    pub fn wins(&self) -> usize {
        self.entries.iter().filter(|e| e.won).count()
    }
}
