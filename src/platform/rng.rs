use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::RandomSource;

/// Process-wide thread-local generator, the default for interactive use.
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_float(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Deterministically seeded generator for reproducible runs and tests.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_float(&mut self) -> f64 {
        self.rng.gen()
    }
}
