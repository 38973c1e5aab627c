//! Plucked string - Karplus-Strong physical model.
//!
//! A burst of filtered noise is fed into a delay line one period long. The
//! loop keeps recirculating it through a gentle averaging filter, so the
//! burst settles into a pitched, string-like tone whose brightness fades.
//!
//! # How It Works
//!
//! 1. Note-on clears the loop and arms a noise burst (10 ms by default)
//! 2. Noise passes a one-pole low-pass before entering the loop (darker
//!    excitation = softer pick)
//! 3. Each sample the loop reads one period back, blends it with the
//!    previous output (damping) and soft-clips the result
//! 4. The clipped sample is written back, so the loop can never grow
//!
//! # Controls
//!
//! - Shape: damping. Higher values dull the tone faster
//! - Shift-Shape: excitation pole. Higher values pick with a softer burst
//! - Id1: burst length, 1 to 100 ms
//! - Host shape LFO: added to the damping, ramped across each block

use crate::{
    dsp::{
        delay::DelayLine,
        distortion::{soft_clip, SOFT_CLIP_KNEE},
        modulate::apply_modulation,
        noise::{WhiteNoise, DEFAULT_SEED},
        one_pole::OnePole,
        ramp::ParamRamp,
    },
    host::{frames_in, CycleParams, OscParam, Oscillator, Pitch},
    io::converter::param_val_to_f32,
    DELAY_CAPACITY, SAMPLE_RATE,
};

pub const DEFAULT_ATTACK_MS: f32 = 10.0;
pub const DEFAULT_DAMPING: f32 = 0.5;
pub const DEFAULT_EXCITATION_POLE: f32 = 0.9;

const DAMPING_MIN: f32 = 1.0e-6;
const DAMPING_MAX: f32 = 1.0 - 1.0e-6;
/// Lower bound for normalized controls before they turn into a coefficient.
const CONTROL_MIN: f32 = 1.0e-7;
const MIN_LENGTH: f32 = 2.0;

pub struct PluckedString {
    delay: DelayLine,
    excitation: OnePole,
    noise: WhiteNoise,
    seed: u64,
    sample_rate: f32,
    attack_ms: f32,
    damping: f32,
    /// Samples of excitation left in the current burst.
    burst: u32,
    /// Burst length latched by note-on, started by the next block.
    pending_burst: u32,
    reset_pending: bool,
    lfo: ParamRamp,
    last_sig: f32,
}

impl PluckedString {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_seed(sample_rate, DEFAULT_SEED)
    }

    /// Voice whose excitation noise replays identically after every
    /// `initialize`.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            SAMPLE_RATE
        };
        // Keep the lowest playable pitch the same at higher sample rates
        let capacity = (DELAY_CAPACITY as f32 * (sample_rate / SAMPLE_RATE).max(1.0)).ceil();

        let mut voice = Self {
            delay: DelayLine::new(capacity as usize),
            excitation: OnePole::with_pole(DEFAULT_EXCITATION_POLE),
            noise: WhiteNoise::new(seed),
            seed,
            sample_rate,
            attack_ms: DEFAULT_ATTACK_MS,
            damping: DEFAULT_DAMPING,
            burst: 0,
            pending_burst: 0,
            reset_pending: false,
            lfo: ParamRamp::default(),
            last_sig: 0.0,
        };
        voice.initialize(0, 0);
        voice
    }

    /// Samples of excitation still to come, counting a burst that note-on
    /// has armed but the next block has not started yet.
    pub fn burst_remaining(&self) -> u32 {
        if self.reset_pending {
            self.pending_burst
        } else {
            self.burst
        }
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Loop length in samples for a frequency, clamped to what the delay
    /// line can hold.
    pub fn loop_length(&self, hz: f32) -> f32 {
        let max = (self.delay.capacity() - 1) as f32;
        let length = self.sample_rate / hz;
        if length.is_nan() {
            return max;
        }
        length.clamp(MIN_LENGTH, max)
    }

    fn burst_samples(&self) -> u32 {
        (self.attack_ms * self.sample_rate / 1000.0).round() as u32
    }
}

impl Oscillator for PluckedString {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        self.delay.clear();
        self.excitation = OnePole::with_pole(DEFAULT_EXCITATION_POLE);
        self.noise.reseed(self.seed);
        self.attack_ms = DEFAULT_ATTACK_MS;
        self.damping = DEFAULT_DAMPING;
        self.burst = 0;
        self.pending_burst = 0;
        self.reset_pending = false;
        self.lfo.snap(0.0);
        self.last_sig = 0.0;
    }

    fn note_on(&mut self, _pitch: Pitch) {
        self.pending_burst = self.burst_samples();
        self.reset_pending = true;
    }

    fn set_param(&mut self, index: u16, value: u16) {
        let v = param_val_to_f32(value);
        match OscParam::from_index(index) {
            Some(OscParam::Shape) => {
                self.damping = 1.0 - v.clamp(CONTROL_MIN, DAMPING_MAX);
            }
            Some(OscParam::ShiftShape) => {
                let inv = 1.0 - v;
                let pole = (1.0 - inv * inv * inv).clamp(CONTROL_MIN, DAMPING_MAX);
                self.excitation.set_pole(pole);
            }
            Some(OscParam::Id(1)) => {
                self.attack_ms = 1.0 + 99.0 * v;
            }
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
            self.delay.clear();
            self.burst = self.pending_burst;
        }

        self.lfo.set_target(cycle.shape_lfo);
        self.lfo.begin_block(frames);
        // Offset 0 is the previous output, so one period back is `length - 1`
        let length = self.loop_length(cycle.pitch.frequency());

        for frame in output[..frames * 2].chunks_exact_mut(2) {
            let lfo = self.lfo.next();
            let damping =
                apply_modulation(self.damping, lfo, 1.0).clamp(DAMPING_MIN, DAMPING_MAX);

            let mut sig = self.delay.read_fractional(length - 1.0);
            sig = sig * damping + self.last_sig * (1.0 - damping);

            if self.burst > 0 {
                self.burst -= 1;
                sig += self.excitation.process(self.noise.next_sample());
            }

            let out = soft_clip(SOFT_CLIP_KNEE, sig);
            self.delay.write(out);
            self.last_sig = out;

            frame[0] = out;
            frame[1] = out;
        }
    }

    fn name(&self) -> &'static str {
        "pluck"
    }
}
