//! Host-side settings for a [`Rack`](crate::host::Rack).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::noise::DEFAULT_SEED, MAX_BLOCK_SIZE, SAMPLE_RATE, SAMPLE_RATE_RANGE};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackConfig {
    pub sample_rate: f32,
    /// Frames per processing block; messages land at block boundaries.
    pub block_size: usize,
    pub shape_lfo_hz: f32,
    /// Scale of the shape LFO handed to voices, 0 disables it.
    pub shape_lfo_depth: f32,
    pub queue_capacity: usize,
    pub noise_seed: u64,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            block_size: 64,
            shape_lfo_hz: 0.5,
            shape_lfo_depth: 0.0,
            queue_capacity: 256,
            noise_seed: DEFAULT_SEED,
        }
    }
}

impl RackConfig {
    pub fn sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn shape_lfo(mut self, hz: f32, depth: f32) -> Self {
        self.shape_lfo_hz = hz;
        self.shape_lfo_depth = depth;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = seed;
        self
    }

    /// Sample rate clamped to what the modules are tuned for. Non-finite
    /// values fall back to 48 kHz.
    pub fn effective_sample_rate(&self) -> f32 {
        if self.sample_rate.is_finite() {
            self.sample_rate.clamp(SAMPLE_RATE_RANGE.0, SAMPLE_RATE_RANGE.1)
        } else {
            SAMPLE_RATE
        }
    }

    pub fn effective_block_size(&self) -> usize {
        self.block_size.clamp(1, MAX_BLOCK_SIZE)
    }

    pub fn effective_lfo_depth(&self) -> f32 {
        if self.shape_lfo_depth.is_nan() {
            0.0
        } else {
            self.shape_lfo_depth.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = RackConfig::default()
            .sample_rate(44_100.0)
            .block_size(32)
            .shape_lfo(2.0, 0.25)
            .queue_capacity(16)
            .noise_seed(9);
        assert_eq!(config.sample_rate, 44_100.0);
        assert_eq!(config.block_size, 32);
        assert_eq!(config.shape_lfo_hz, 2.0);
        assert_eq!(config.shape_lfo_depth, 0.25);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.noise_seed, 9);
    }

    #[test]
    fn test_effective_values_are_clamped() {
        let config = RackConfig::default()
            .sample_rate(f32::NAN)
            .block_size(0)
            .shape_lfo(1.0, 3.0);
        assert_eq!(config.effective_sample_rate(), SAMPLE_RATE);
        assert_eq!(config.effective_block_size(), 1);
        assert_eq!(config.effective_lfo_depth(), 1.0);

        let config = RackConfig::default().sample_rate(1e9).block_size(1 << 20);
        assert_eq!(config.effective_sample_rate(), 192_000.0);
        assert_eq!(config.effective_block_size(), MAX_BLOCK_SIZE);
    }
}
