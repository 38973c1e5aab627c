//! Sample-rate and bit-depth reduction.

/*
Bitcrusher
==========

Two kinds of damage, applied together:

  depth     Each sample is snapped to a grid of step 1/max over [-1, 1]:

                max = 2^depth - 1
                q(x) = round((x + 1)·max) / max - 1

            At 1 bit the grid is just -1, 0 and +1. At 24 bits it is as
            fine as the f32 mantissa and the stage is effectively
            transparent.

  rate      The output only picks up a new input sample `rate` times per
            second and holds it in between (sample-and-hold).

Step Timing
-----------

Deciding when to capture with a float accumulator drifts: after enough
samples the hold lengths wander. Instead an integer accumulator counts in
units of 1/fs:

    acc += rate
    if acc >= fs { acc -= fs; capture }

That is Bresenham's line algorithm. An integer ratio holds each level for
exactly fs/rate samples. A ratio like 48000/7000 alternates holds of 6 and
7 samples and captures exactly 7000 times per 48000 frames. The
accumulator lives in the struct, so block boundaries are invisible.
*/

use crate::{
    host::{frames_in, Effect, FxParam},
    io::converter::q31_to_f32,
    SAMPLE_RATE, SAMPLE_RATE_RANGE,
};

pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 24;

/// Snap `x` to a `depth`-bit grid over [-1, 1].
///
/// # Example
/// ```
/// use pluck_dsp::effects::bitcrusher::quantize;
/// assert_eq!(quantize(0.3, 1), 0.0);
/// assert_eq!(quantize(0.6, 1), 1.0);
/// assert_eq!(quantize(-0.6, 1), -1.0);
/// ```
#[inline]
pub fn quantize(x: f32, depth: u32) -> f32 {
    let max = ((1u32 << depth.clamp(MIN_DEPTH, MAX_DEPTH)) - 1) as f32;
    ((x + 1.0) * max).round() / max - 1.0
}

pub struct Bitcrusher {
    sample_rate: u32,
    rate: u32,
    depth: u32,
    acc: u32,
    held: [f32; 2],
}

impl Bitcrusher {
    pub fn new(sample_rate: f32) -> Self {
        // Bounded so the step accumulator can never overflow
        let sample_rate = if sample_rate.is_finite() {
            sample_rate
                .clamp(SAMPLE_RATE_RANGE.0, SAMPLE_RATE_RANGE.1)
                .round() as u32
        } else {
            SAMPLE_RATE as u32
        };
        let mut fx = Self {
            sample_rate,
            rate: sample_rate,
            depth: MAX_DEPTH,
            acc: 0,
            held: [0.0; 2],
        };
        fx.initialize(0, 0);
        fx
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Capture rate in Hz, clamped to `[1, sample_rate]`.
    pub fn set_rate(&mut self, hz: u32) {
        self.rate = hz.clamp(1, self.sample_rate);
    }

    pub fn set_depth(&mut self, bits: u32) {
        self.depth = bits.clamp(MIN_DEPTH, MAX_DEPTH);
    }
}

impl Effect for Bitcrusher {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        self.rate = self.sample_rate;
        self.depth = MAX_DEPTH;
        // Primed so the first frame is captured at any rate
        self.acc = self.sample_rate - 1;
        self.held = [0.0; 2];
    }

    fn set_param(&mut self, index: u8, value: i32) {
        let v = q31_to_f32(value).clamp(0.0, 1.0);
        match FxParam::from_index(index) {
            Some(FxParam::Time) => {
                let span = (self.sample_rate - 1) as f32;
                self.set_rate((span * v + 1.0).round() as u32);
            }
            Some(FxParam::Depth) => {
                self.set_depth(((MAX_DEPTH - MIN_DEPTH) as f32 * v + 1.0).round() as u32);
            }
            _ => {}
        }
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32], frames: usize) {
        let frames = frames_in(input.len().min(output.len()), frames);

        for (dry, wet) in input[..frames * 2]
            .chunks_exact(2)
            .zip(output[..frames * 2].chunks_exact_mut(2))
        {
            self.acc += self.rate;
            if self.acc >= self.sample_rate {
                self.acc -= self.sample_rate;
                self.held = [quantize(dry[0], self.depth), quantize(dry[1], self.depth)];
            }
            wet.copy_from_slice(&self.held);
        }
    }

    fn name(&self) -> &'static str {
        "bitcrusher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::converter::f32_to_q31;

    fn ramp_input(frames: usize) -> Vec<f32> {
        (0..frames)
            .flat_map(|i| {
                let x = i as f32 / frames as f32 * 2.0 - 1.0;
                [x, -x]
            })
            .collect()
    }

    #[test]
    fn test_quantize_levels() {
        // 8 bits: 255 steps across [-1, 1]
        let expected = 319.0 / 255.0 - 1.0;
        assert!((quantize(0.25, 8) - expected).abs() < 1e-6);
        assert_eq!(quantize(-1.0, 8), -1.0);
        assert_eq!(quantize(1.0, 8), 1.0);
        assert!((quantize(0.123_456, 24) - 0.123_456).abs() < 1e-6);
    }

    #[test]
    fn test_integer_ratio_holds_exact_steps() {
        let mut fx = Bitcrusher::new(48_000.0);
        fx.set_rate(12_000);
        fx.set_depth(8);

        let input: Vec<f32> = (0..64)
            .flat_map(|i| {
                let x = i as f32 * 0.01 - 1.0;
                [x, x]
            })
            .collect();
        let mut output = vec![0.0; 128];
        fx.process_block(&input, &mut output, 64);

        let left: Vec<f32> = output.iter().step_by(2).copied().collect();
        for (i, &y) in left.iter().enumerate() {
            assert_eq!(y, left[i - i % 4], "frame {i} should hold frame {}", i - i % 4);
            assert_eq!(y, quantize(input[2 * (i - i % 4)], 8));
        }
        // Hand-computed: -1, round(0.04 * 255) / 255 - 1, round(0.08 * 255) / 255 - 1
        assert_eq!(left[0], -1.0);
        assert!((left[4] - (10.0 / 255.0 - 1.0)).abs() < 1e-6);
        assert!((left[8] - (20.0 / 255.0 - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_non_integer_ratio_does_not_drift() {
        let frames = 48_000;
        let input = ramp_input(frames);

        let mut whole = Bitcrusher::new(48_000.0);
        whole.set_rate(7_000);
        let mut expected = vec![0.0; 2 * frames];
        whole.process_block(&input, &mut expected, frames);

        // Each capture of a rising ramp yields a new level
        let changes = expected
            .chunks_exact(2)
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0][0] != w[1][0])
            .count();
        assert_eq!(changes + 1, 7_000);

        let mut split = Bitcrusher::new(48_000.0);
        split.set_rate(7_000);
        let mut actual = vec![0.0; 2 * frames];
        let mut start = 0;
        for size in [1usize, 17, 64, 333, 5, 2048].iter().cycle() {
            if start >= frames {
                break;
            }
            let end = (start + size).min(frames);
            split.process_block(
                &input[2 * start..2 * end],
                &mut actual[2 * start..2 * end],
                end - start,
            );
            start = end;
        }
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_params_map_to_rate_and_depth() {
        let mut fx = Bitcrusher::new(48_000.0);
        assert_eq!(fx.rate(), 48_000);
        assert_eq!(fx.depth(), MAX_DEPTH);

        fx.set_param(FxParam::Time.index(), 0);
        fx.set_param(FxParam::Depth.index(), 0);
        assert_eq!(fx.rate(), 1);
        assert_eq!(fx.depth(), 1);

        fx.set_param(FxParam::Time.index(), f32_to_q31(11_999.0 / 47_999.0));
        fx.set_param(FxParam::Depth.index(), f32_to_q31(7.0 / 23.0));
        assert_eq!(fx.rate(), 12_000);
        assert_eq!(fx.depth(), 8);

        fx.set_param(FxParam::Time.index(), i32::MAX);
        assert_eq!(fx.rate(), 48_000);
    }

    #[test]
    fn test_sample_rate_is_clamped() {
        assert_eq!(Bitcrusher::new(1.0e12).sample_rate, 192_000);
        assert_eq!(Bitcrusher::new(10.0).sample_rate, 8_000);
        assert_eq!(Bitcrusher::new(f32::NAN).sample_rate, 48_000);

        // Full rate at the top of the range still runs without overflow
        let mut fx = Bitcrusher::new(f32::MAX);
        fx.set_param(FxParam::Time.index(), i32::MAX);
        assert_eq!(fx.rate(), 192_000);
        let input = vec![0.5; 2 * 1024];
        let mut output = vec![0.0; 2 * 1024];
        fx.process_block(&input, &mut output, 1024);
        assert!(output.iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_default_is_transparent_to_24_bits() {
        let mut fx = Bitcrusher::new(48_000.0);
        let input = ramp_input(512);
        let mut output = vec![0.0; 1024];
        fx.process_block(&input, &mut output, 512);
        for (x, y) in input.iter().zip(&output) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}
