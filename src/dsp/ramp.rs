//! Block-to-sample parameter smoothing.

/*
Parameter Ramp
==============

Controls arrive once per block (a knob move, the host's LFO value for this
block). Jumping straight to the new value makes an audible step - a click
or "zipper" noise. The ramp spreads the change linearly over the samples of
the block instead:

    value
      │          target ●
      │            ●
      │        ●
      │    ●
      ● start
      └──────────────────→ sample
        0   1   2   3   4        (frames = 4)

    increment = (target - start) / frames

`begin_block` latches the increment once per block, `next` hands out one
value per sample. Once the block's samples are used up the ramp sits exactly
on the target, so floating point error never accumulates across blocks.

A new target set mid-block is only picked up by the next `begin_block`,
which is what keeps the per-sample loop free of torn updates.
*/

#[derive(Debug, Clone, Copy)]
pub struct ParamRamp {
    current: f32,
    target: f32,
    block_end: f32,
    increment: f32,
    remaining: usize,
}

impl ParamRamp {
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            block_end: value,
            increment: 0.0,
            remaining: 0,
        }
    }

    /// Value the ramp is heading to from the next block on.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current value (value of the most recent `next`).
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Jump to `value` immediately, cancelling any ramp in flight.
    pub fn snap(&mut self, value: f32) {
        if value.is_finite() {
            self.current = value;
            self.target = value;
            self.block_end = value;
        }
        self.increment = 0.0;
        self.remaining = 0;
    }

    /// Latch the per-sample increment for a block of `frames` samples.
    ///
    /// Zero frames leaves the ramp untouched.
    pub fn begin_block(&mut self, frames: usize) {
        if frames == 0 {
            return;
        }
        self.block_end = self.target;
        self.increment = (self.block_end - self.current) / frames as f32;
        self.remaining = frames;
    }

    /// Return the value for this sample, then step toward the target.
    ///
    /// # Example
    /// ```
    /// use pluck_dsp::dsp::ramp::ParamRamp;
    /// let mut ramp = ParamRamp::new(0.0);
    /// ramp.set_target(1.0);
    /// ramp.begin_block(4);
    /// let values: Vec<f32> = (0..4).map(|_| ramp.next()).collect();
    /// assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
    /// assert_eq!(ramp.value(), 1.0);
    /// ```
    #[inline]
    pub fn next(&mut self) -> f32 {
        let out = self.current;
        match self.remaining {
            0 => {}
            1 => {
                self.current = self.block_end;
                self.remaining = 0;
            }
            _ => {
                self.current += self.increment;
                self.remaining -= 1;
            }
        }
        out
    }
}

impl Default for ParamRamp {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target_at_block_end() {
        let mut ramp = ParamRamp::new(0.2);
        ramp.set_target(-0.7);
        ramp.begin_block(37);
        for _ in 0..37 {
            ramp.next();
        }
        assert_eq!(ramp.value(), -0.7);
    }

    #[test]
    fn test_values_are_linear_within_block() {
        let mut ramp = ParamRamp::new(1.0);
        ramp.set_target(2.0);
        ramp.begin_block(8);
        let values: Vec<f32> = (0..8).map(|_| ramp.next()).collect();
        for (i, v) in values.iter().enumerate() {
            assert!((v - (1.0 + i as f32 / 8.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_holds_after_block_is_exhausted() {
        let mut ramp = ParamRamp::new(0.0);
        ramp.set_target(1.0);
        ramp.begin_block(2);
        ramp.next();
        ramp.next();
        assert_eq!(ramp.next(), 1.0);
        assert_eq!(ramp.next(), 1.0);
    }

    #[test]
    fn test_zero_frames_is_noop() {
        let mut ramp = ParamRamp::new(0.5);
        ramp.set_target(0.9);
        ramp.begin_block(0);
        assert_eq!(ramp.next(), 0.5);
        assert_eq!(ramp.value(), 0.5);
    }

    #[test]
    fn test_target_change_waits_for_next_block() {
        let mut ramp = ParamRamp::new(0.0);
        ramp.set_target(1.0);
        ramp.begin_block(4);
        ramp.next();
        ramp.set_target(-1.0);
        for _ in 0..3 {
            ramp.next();
        }
        // The in-flight block still ends on the old target
        assert_eq!(ramp.value(), 1.0);

        ramp.begin_block(2);
        ramp.next();
        ramp.next();
        assert_eq!(ramp.value(), -1.0);
    }

    #[test]
    fn test_snap_and_non_finite_targets() {
        let mut ramp = ParamRamp::new(0.0);
        ramp.set_target(f32::INFINITY);
        assert_eq!(ramp.target(), 0.0);
        ramp.snap(0.3);
        ramp.begin_block(16);
        assert_eq!(ramp.next(), 0.3);
        assert_eq!(ramp.value(), 0.3);
    }
}
