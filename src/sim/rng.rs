//! Seeded value generation for gate layouts
//!
//! All randomness in the simulation flows through one [`ValueGenerator`] so a
//! seed plus an input sequence fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Reproducible source of gate positions and values
#[derive(Debug, Clone)]
pub struct ValueGenerator {
    seed: u64,
    rng: Pcg32,
}

impl ValueGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform lateral position in [min, max]
    pub fn lateral(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Uniform integer value in [min, max]
    pub fn value(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
