//! Van der Pol oscillator integrated with fourth-order Runge-Kutta.

/*
Van der Pol
===========

A self-sustaining oscillator from circuit theory:

    x' = y
    y' = mu·(1 - x²)·y - alpha·x

  alpha     (2π·f)², sets the natural frequency
  mu        nonlinearity. At 0 this is a plain harmonic oscillator
            (a sine wave). As mu grows the waveform turns into a
            relaxation oscillation: slow ramps and sudden snaps, rich in
            odd harmonics.

Whatever the starting point, the system settles onto a limit cycle with
|x| around 2, so the voice halves x before soft-clipping it.

Integration
-----------

One classic RK4 step of size h = 1/fs per output sample:

    k1 = f(s)
    k2 = f(s + h/2·k1)
    k3 = f(s + h/2·k2)
    k4 = f(s + h·k3)
    s' = s + h/6·(k1 + 2k2 + 2k3 + k4)

The stages are evaluated in a fixed order, so the same inputs always give
bit-identical output.
*/

use std::f32::consts::TAU;

use crate::{
    dsp::distortion::{soft_clip, SOFT_CLIP_KNEE},
    host::{frames_in, CycleParams, OscParam, Oscillator, Pitch},
    io::converter::param_val_to_f32,
    SAMPLE_RATE,
};

pub const MU_MAX: f32 = 10_000.0;
const START: (f32, f32) = (1.0, 1.0);

#[inline]
fn accel(x: f32, y: f32, mu: f32, alpha: f32) -> f32 {
    mu * (1.0 - x * x) * y - alpha * x
}

/// Advance `(x, y)` by one RK4 step of size `h`.
#[inline]
pub fn rk4_step(x: f32, y: f32, mu: f32, alpha: f32, h: f32) -> (f32, f32) {
    let half = 0.5 * h;

    let k1x = y;
    let k1y = accel(x, y, mu, alpha);

    let k2x = y + half * k1y;
    let k2y = accel(x + half * k1x, y + half * k1y, mu, alpha);

    let k3x = y + half * k2y;
    let k3y = accel(x + half * k2x, y + half * k2y, mu, alpha);

    let k4x = y + h * k3y;
    let k4y = accel(x + h * k3x, y + h * k3y, mu, alpha);

    let sixth = h / 6.0;
    (
        x + sixth * (k1x + 2.0 * k2x + 2.0 * k3x + k4x),
        y + sixth * (k1y + 2.0 * k2y + 2.0 * k3y + k4y),
    )
}

pub struct VanDerPol {
    h: f32,
    x: f32,
    y: f32,
    mu: f32,
    reset_pending: bool,
}

impl VanDerPol {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            SAMPLE_RATE
        };
        let mut voice = Self {
            h: 1.0 / sample_rate,
            x: START.0,
            y: START.1,
            mu: 0.0,
            reset_pending: false,
        };
        voice.initialize(0, 0);
        voice
    }

    pub fn mu(&self) -> f32 {
        self.mu
    }

    pub fn state(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl Oscillator for VanDerPol {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        (self.x, self.y) = START;
        self.mu = 0.0;
        self.reset_pending = false;
    }

    fn note_on(&mut self, _pitch: Pitch) {
        self.reset_pending = true;
    }

    fn set_param(&mut self, index: u16, value: u16) {
        if let Some(OscParam::Shape) = OscParam::from_index(index) {
            self.mu = MU_MAX * param_val_to_f32(value);
        }
    }

    fn process_block(&mut self, cycle: &CycleParams, output: &mut [f32], frames: usize) {
        let frames = frames_in(output.len(), frames);
        if frames == 0 {
            return;
        }

        if self.reset_pending {
            self.reset_pending = false;
            (self.x, self.y) = START;
        }

        let w = TAU * cycle.pitch.frequency();
        let alpha = w * w;

        for frame in output[..frames * 2].chunks_exact_mut(2) {
            let (x, y) = rk4_step(self.x, self.y, self.mu, alpha, self.h);
            (self.x, self.y) = if x.is_finite() && y.is_finite() {
                (x, y)
            } else {
                START
            };

            let out = soft_clip(SOFT_CLIP_KNEE, 0.5 * self.x);
            frame[0] = out;
            frame[1] = out;
        }
    }

    fn name(&self) -> &'static str {
        "van der pol"
    }
}
