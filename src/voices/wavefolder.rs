//! Wavefolder - sine oscillator through a fold, a drive and a feedback path.
//!
//! # How It Works
//!
//! Three signals are derived from one sine wave and summed:
//!
//! 1. Fold: the sine pushed through `sin(2π·fmod(dist·x, 1))`. More `dist`
//!    wraps the waveform over itself more often (brighter)
//! 2. Feed-forward: the sine driven into the soft clipper
//! 3. Feedback: the previous sum driven into the soft clipper
//!
//! The three weights are normalized by their sum so turning one up shifts
//! the balance instead of the level. The result is soft-clipped once more
//! on its way out.
//!
//! # Controls
//!
//! - Id1 / Id2 / Id3: fold, feed-forward and feedback weights (centred, 0..=200)
//! - Id4: feedback drive, 1 to 2
//! - Shape: fold amount, 0 to 3
//! - Shift-Shape: feed-forward drive, 1 to 2
//! - Host shape LFO: scales the fold amount, `dist·(1 + lfo)`

use std::f32::consts::TAU;

use crate::{
    dsp::{
        distortion::{sine_fold, soft_clip, SOFT_CLIP_KNEE},
        ramp::ParamRamp,
    },
    host::{frames_in, CycleParams, OscParam, Oscillator, Pitch},
    io::converter::{bipolar_param, param_val_to_f32},
    SAMPLE_RATE,
};

pub const DEFAULT_FOLD_GAIN: f32 = -0.384_615_38;
pub const DEFAULT_FEEDFORWARD_GAIN: f32 = 0.615_384_6;
pub const DEFAULT_FEEDBACK_GAIN: f32 = 0.769_230_8;

const MAX_FOLD: f32 = 3.0;
const GAIN_SUM_MIN: f32 = 1.0e-6;

pub struct Wavefolder {
    sample_rate_recip: f32,
    phase: f32,
    dist: f32,
    ff_drive: f32,
    fb_drive: f32,
    fold_gain: f32,
    ff_gain: f32,
    fb_gain: f32,
    z: f32,
    lfo: ParamRamp,
    reset_pending: bool,
}

impl Wavefolder {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            SAMPLE_RATE
        };
        let mut voice = Self {
            sample_rate_recip: 1.0 / sample_rate,
            phase: 0.0,
            dist: 0.0,
            ff_drive: 1.0,
            fb_drive: 1.0,
            fold_gain: DEFAULT_FOLD_GAIN,
            ff_gain: DEFAULT_FEEDFORWARD_GAIN,
            fb_gain: DEFAULT_FEEDBACK_GAIN,
            z: 0.0,
            lfo: ParamRamp::default(),
            reset_pending: false,
        };
        voice.initialize(0, 0);
        voice
    }

    /// Mix weights normalized by their sum.
    fn weights(&self) -> (f32, f32, f32) {
        let sum = self.fold_gain + self.ff_gain + self.fb_gain;
        if sum.abs() < GAIN_SUM_MIN {
            return (self.fold_gain, self.ff_gain, self.fb_gain);
        }
        (self.fold_gain / sum, self.ff_gain / sum, self.fb_gain / sum)
    }
}

impl Oscillator for Wavefolder {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        self.phase = 0.0;
        self.dist = 0.0;
        self.ff_drive = 1.0;
        self.fb_drive = 1.0;
        self.fold_gain = DEFAULT_FOLD_GAIN;
        self.ff_gain = DEFAULT_FEEDFORWARD_GAIN;
        self.fb_gain = DEFAULT_FEEDBACK_GAIN;
        self.z = 0.0;
        self.lfo.snap(0.0);
        self.reset_pending = false;
    }

    fn note_on(&mut self, _pitch: Pitch) {
        self.reset_pending = true;
    }

    fn set_param(&mut self, index: u16, value: u16) {
        match OscParam::from_index(index) {
            Some(OscParam::Id(1)) => self.fold_gain = bipolar_param(value),
            Some(OscParam::Id(2)) => self.ff_gain = bipolar_param(value),
            Some(OscParam::Id(3)) => self.fb_gain = bipolar_param(value),
            Some(OscParam::Id(4)) => self.fb_drive = 1.0 + param_val_to_f32(value),
            Some(OscParam::Shape) => self.dist = MAX_FOLD * param_val_to_f32(value),
            Some(OscParam::ShiftShape) => self.ff_drive = 1.0 + param_val_to_f32(value),
            _ => {}
        }
    }

    fn process_block(&mut self, cycle: &CycleParams, output: &mut [f32], frames: usize) {
        let frames = frames_in(output.len(), frames);
        if frames == 0 {
            return;
        }

        if self.reset_pending {
            self.reset_pending = false;
            self.phase = 0.0;
            self.lfo.snap(cycle.shape_lfo);
        } else {
            self.lfo.set_target(cycle.shape_lfo);
        }
        self.lfo.begin_block(frames);

        let w0 = cycle.pitch.w0(self.sample_rate_recip);
        let (fold_w, ff_w, fb_w) = self.weights();

        for frame in output[..frames * 2].chunks_exact_mut(2) {
            let dist_mod = self.dist + self.lfo.next() * self.dist;
            let x = (TAU * self.phase).sin();

            let folded = sine_fold(x, dist_mod);
            let ff = soft_clip(SOFT_CLIP_KNEE, self.ff_drive * x);
            let fb = soft_clip(SOFT_CLIP_KNEE, self.fb_drive * self.z);
            self.z = fold_w * folded + ff_w * ff + fb_w * fb;

            let out = soft_clip(SOFT_CLIP_KNEE, self.z);
            frame[0] = out;
            frame[1] = out;

            self.phase += w0;
            self.phase -= self.phase.floor();
        }
    }

    fn name(&self) -> &'static str {
        "wavefolder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(note: u8, lfo: f32) -> CycleParams {
        CycleParams {
            pitch: Pitch::new(note, 0),
            shape_lfo: lfo,
        }
    }

    fn render(voice: &mut Wavefolder, cycle: &CycleParams, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames * 2];
        for block in out.chunks_mut(128) {
            let n = block.len() / 2;
            voice.process_block(cycle, block, n);
        }
        out
    }

    #[test]
    fn test_output_bounded_for_extreme_settings() {
        let settings = [(0, 200, 200), (200, 0, 0), (100, 100, 101), (0, 0, 0)];
        for &(wf, ff, fb) in &settings {
            let mut voice = Wavefolder::new(48_000.0);
            voice.set_param(0, wf);
            voice.set_param(1, ff);
            voice.set_param(2, fb);
            voice.set_param(3, 1023);
            voice.set_param(OscParam::Shape.index(), 1023);
            voice.set_param(OscParam::ShiftShape.index(), 1023);
            voice.note_on(Pitch::new(60, 0));

            let out = render(&mut voice, &cycle(60, 1.0), 4096);
            for s in out {
                assert!(s.is_finite() && s.abs() <= 0.95, "({wf}, {ff}, {fb}) gave {s}");
            }
        }
    }

    #[test]
    fn test_weights_are_normalized() {
        let mut voice = Wavefolder::new(48_000.0);
        let (a, b, c) = voice.weights();
        assert!((a + b + c - 1.0).abs() < 1e-5);

        // Sum of exactly zero keeps the raw weights
        voice.set_param(0, 150);
        voice.set_param(1, 50);
        voice.set_param(2, 100);
        assert_eq!(voice.weights(), (0.5, -0.5, 0.0));
    }

    #[test]
    fn test_each_param_is_independent() {
        let mut voice = Wavefolder::new(48_000.0);
        voice.set_param(0, 200);
        assert_eq!(voice.fold_gain, 1.0);
        assert_eq!(voice.ff_gain, DEFAULT_FEEDFORWARD_GAIN);
        assert_eq!(voice.fb_gain, DEFAULT_FEEDBACK_GAIN);

        voice.set_param(2, 0);
        assert_eq!(voice.fb_gain, -1.0);
        assert_eq!(voice.fb_drive, 1.0);

        voice.set_param(3, 1023);
        assert_eq!(voice.fb_drive, 2.0);
        assert_eq!(voice.fb_gain, -1.0);
    }

    #[test]
    fn test_note_on_restarts_phase() {
        let mut voice = Wavefolder::new(48_000.0);
        voice.note_on(Pitch::new(69, 0));
        let first = render(&mut voice, &cycle(69, 0.0), 300);

        voice.initialize(0, 0);
        voice.note_on(Pitch::new(69, 0));
        let again = render(&mut voice, &cycle(69, 0.0), 300);
        assert_eq!(first, again);
        // Phase 0 starts on a zero crossing with no feedback history
        assert_eq!(first[0], 0.0);
    }

    #[test]
    fn test_fold_adds_harmonics() {
        let energy_of_difference = |dist: u16| {
            let mut voice = Wavefolder::new(48_000.0);
            voice.set_param(OscParam::Shape.index(), dist);
            voice.note_on(Pitch::new(57, 0));
            let out = render(&mut voice, &cycle(57, 0.0), 4800);
            out.chunks_exact(2)
                .map(|f| f[0])
                .collect::<Vec<_>>()
                .windows(2)
                .map(|w| (w[1] - w[0]).powi(2))
                .sum::<f32>()
        };
        // First differences weight high partials more heavily
        assert!(energy_of_difference(1023) > energy_of_difference(0));
    }
}
