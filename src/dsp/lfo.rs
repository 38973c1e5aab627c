//! Phase-accumulator LFO with bipolar and phase-offset waveforms.

/*
Periodic Modulator
==================

An LFO is an oscillator running at control rate (roughly 0.01 - 20 Hz) whose
output moves a parameter instead of being listened to directly.

Vocabulary
----------

  phase         Position inside the current cycle, in [0, 1).
                0.0 = start of cycle, 0.5 = halfway.

  f0            Normalized frequency: cycles per sample.
                f0 = hz / sample_rate. At 1 Hz and 48 kHz, f0 ≈ 0.0000208.

  bipolar       Output in [-1, +1], centred on zero.

  unipolar      Output in [0, 1]. unipolar = (bipolar + 1) / 2

  offset        A fraction of a cycle added to the phase before the
                waveform is evaluated. Offset 0.25 is a quarter cycle
                (90 degrees) ahead.


Phase Accumulation
------------------

Each sample:

    phase += f0
    phase -= floor(phase)        (wrap into [0, 1))

The waveform accessors are pure functions of `phase`. Calling `sine_bi()`
twice returns the same value; only `advance()` moves time forward. Effects
call `advance()` exactly once per output sample and then read as many
waveforms as they need.


Waveforms (all bipolar, all start at zero crossing or edge at phase 0)
---------

    sine        sin(2π·phase)
    triangle    0 → +1 at 1/4 → 0 at 1/2 → -1 at 3/4 → 0
    saw         -1 at phase 0 rising to +1 at phase 1
    square      +1 for the first half, -1 for the second

Sine and triangle have no discontinuities at all. Saw and square jump once
per cycle, which at control rates is a musical "step" rather than aliasing.


Stereo Width
------------

Reading the right channel with an offset decorrelates it from the left:

    left  = lfo.sine_bi()
    right = lfo.sine_bi_off(0.5)   // opposite phase

Offset 0 gives mono movement, 0.5 makes the channels move in opposite
directions (classic autopan), anything in between widens the image.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Convert unipolar signal (0.0 to 1.0) to bipolar (-1.0 to +1.0).
#[inline]
pub fn unipolar_to_bipolar(unipolar: f32) -> f32 {
    (unipolar * 2.0) - 1.0
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - phase.floor();
    // floor() of a value just below 0 can round the result up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn sine_at(phase: f32) -> f32 {
    (TAU * phase).sin()
}

#[inline]
fn triangle_at(phase: f32) -> f32 {
    let t = wrap_phase(phase + 0.25);
    1.0 - 4.0 * (t - 0.5).abs()
}

#[inline]
fn saw_at(phase: f32) -> f32 {
    2.0 * phase - 1.0
}

#[inline]
fn square_at(phase: f32) -> f32 {
    if phase < 0.5 {
        1.0
    } else {
        -1.0
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoWaveform {
    Sine,
    Triangle,
    Saw,
    Square,
}

impl LfoWaveform {
    pub const ALL: [LfoWaveform; 4] = [
        LfoWaveform::Sine,
        LfoWaveform::Triangle,
        LfoWaveform::Saw,
        LfoWaveform::Square,
    ];

    /// Pick a waveform from a normalized `[0, 1]` control.
    pub fn from_control(value: f32) -> Self {
        let last = (Self::ALL.len() - 1) as f32;
        let index = (value.clamp(0.0, 1.0) * last).round() as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Lfo {
    phase: f32,
    w0: f32,
}

impl Lfo {
    pub fn new() -> Self {
        Self { phase: 0.0, w0: 0.0 }
    }

    /// Set the rate from Hz and the reciprocal of the sample rate.
    ///
    /// Non-positive or NaN rates stop the LFO in place.
    ///
    /// # Example
    /// ```
    /// use pluck_dsp::dsp::lfo::Lfo;
    /// let mut lfo = Lfo::new();
    /// lfo.set_frequency(480.0, 1.0 / 48_000.0);
    /// assert!((lfo.w0() - 0.01).abs() < 1e-7);
    /// ```
    pub fn set_frequency(&mut self, hz: f32, sample_rate_recip: f32) {
        let w0 = hz * sample_rate_recip;
        self.w0 = if w0 > 0.0 { w0.min(0.5) } else { 0.0 };
    }

    pub fn w0(&self) -> f32 {
        self.w0
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Step forward one sample. Call exactly once per output sample.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = wrap_phase(self.phase + self.w0);
    }

    /// Step forward `samples` samples at once.
    #[inline]
    pub fn advance_by(&mut self, samples: usize) {
        self.phase = wrap_phase(self.phase + self.w0 * samples as f32);
    }

    #[inline]
    pub fn sine_bi(&self) -> f32 {
        sine_at(self.phase)
    }

    #[inline]
    pub fn triangle_bi(&self) -> f32 {
        triangle_at(self.phase)
    }

    #[inline]
    pub fn saw_bi(&self) -> f32 {
        saw_at(self.phase)
    }

    #[inline]
    pub fn square_bi(&self) -> f32 {
        square_at(self.phase)
    }

    #[inline]
    pub fn sine_bi_off(&self, offset: f32) -> f32 {
        sine_at(self.offset_phase(offset))
    }

    #[inline]
    pub fn triangle_bi_off(&self, offset: f32) -> f32 {
        triangle_at(self.offset_phase(offset))
    }

    #[inline]
    pub fn saw_bi_off(&self, offset: f32) -> f32 {
        saw_at(self.offset_phase(offset))
    }

    #[inline]
    pub fn square_bi_off(&self, offset: f32) -> f32 {
        square_at(self.offset_phase(offset))
    }

    #[inline]
    pub fn bipolar(&self, wave: LfoWaveform) -> f32 {
        self.bipolar_off(wave, 0.0)
    }

    #[inline]
    pub fn bipolar_off(&self, wave: LfoWaveform, offset: f32) -> f32 {
        match wave {
            LfoWaveform::Sine => self.sine_bi_off(offset),
            LfoWaveform::Triangle => self.triangle_bi_off(offset),
            LfoWaveform::Saw => self.saw_bi_off(offset),
            LfoWaveform::Square => self.square_bi_off(offset),
        }
    }

    #[inline]
    fn offset_phase(&self, offset: f32) -> f32 {
        if offset.is_finite() {
            wrap_phase(self.phase + offset)
        } else {
            self.phase
        }
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}
