//! White noise source for excitation bursts.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Seed used when a voice does not ask for a specific one.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Uniform white noise in [-1, 1).
///
/// Owns its generator, so several voices never share (or lock) an RNG and a
/// seeded source replays the same burst every time.
pub struct WhiteNoise {
    rng: SmallRng,
}

impl WhiteNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.rng.random::<f32>() * 2.0 - 1.0
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
