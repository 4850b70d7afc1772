//! Pour amount source
//!
//! Pours are randomised so a long hold feels like a real pour. The source
//! is a trait so sessions stay reproducible from a seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies the grams added by one pour step
pub trait Dispenser {
    /// Grams in `1..=max`
    fn roll_grams(&mut self, max: u32) -> u32;
}

/// Seeded PCG-backed dispenser
#[derive(Debug, Clone)]
pub struct RandomDispenser {
    rng: Pcg32,
}

impl RandomDispenser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Dispenser for RandomDispenser {
    fn roll_grams(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max.max(1))
    }
}
