//! Single-coefficient low-pass / high-pass stage.

/*
One-Pole Filter
===============

The simplest recursive filter: the output moves a fixed fraction of the way
toward the input every sample.

    z' = a * x + (1 - a) * z

  a close to 1   output follows the input almost immediately (bright)
  a close to 0   output creeps toward the input (dark, heavy smoothing)

The high-pass output is what the low-pass removed: `x - z'`.

Pole vs Coefficient
-------------------

Filter literature usually describes this stage by its pole `p`, the weight
given to the previous output. The two views are mirror images:

    p = 1 - a

`set_pole(0.9)` is a dark filter (a = 0.1), `set_pole(0.1)` a bright one.

Stability
---------

With `a` exactly 0 the filter freezes and with `a` outside [0, 1] it
rings or diverges. Both setters clamp `a` strictly inside (0, 1), so the
recurrence is always a convex blend of bounded values and cannot blow up.
*/

/// Smallest/largest coefficient the filter accepts.
pub const COEFF_MIN: f32 = 1.0e-6;
pub const COEFF_MAX: f32 = 1.0 - 1.0e-6;

#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    coeff: f32,
    z: f32,
}

impl OnePole {
    pub fn new(coeff: f32) -> Self {
        let mut filter = Self { coeff: 0.5, z: 0.0 };
        filter.set_coefficient(coeff);
        filter
    }

    /// Low-pass with the given pole position.
    pub fn with_pole(pole: f32) -> Self {
        Self::new(1.0 - pole)
    }

    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    pub fn set_coefficient(&mut self, coeff: f32) {
        // NaN fails both comparisons inside clamp, so route it explicitly.
        self.coeff = if coeff.is_nan() {
            COEFF_MIN
        } else {
            coeff.clamp(COEFF_MIN, COEFF_MAX)
        };
    }

    pub fn set_pole(&mut self, pole: f32) {
        self.set_coefficient(1.0 - pole);
    }

    /// Advance one sample and return the low-pass output.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.z = self.coeff * x + (1.0 - self.coeff) * self.z;
        self.z
    }

    /// Advance one sample and return the high-pass output.
    #[inline]
    pub fn process_highpass(&mut self, x: f32) -> f32 {
        x - self.process(x)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.z = 0.0;
    }
}
