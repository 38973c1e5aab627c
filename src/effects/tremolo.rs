//! Stereo tremolo.
//!
//! A sine LFO pumps the level of both channels. The right channel reads the
//! LFO a little ahead of the left, so turning up Depth spreads the movement
//! across the stereo field.
//!
//! - Time: LFO rate, 0.1 to 10.1 Hz
//! - Depth: right-channel phase offset, `v²` of a cycle
//! - Shift-Depth: dry/wet mix

use crate::{
    dsp::{
        lfo::{bipolar_to_unipolar, Lfo},
        modulate::amplitude_modulate,
        ramp::ParamRamp,
    },
    host::{frames_in, Effect, FxParam},
    io::converter::q31_to_f32,
    SAMPLE_RATE,
};

pub const DEFAULT_RATE_HZ: f32 = 1.0;
pub const DEFAULT_MIX: f32 = 0.5;

/// Control value to LFO rate in Hz.
#[inline]
pub(crate) fn rate_from_control(v: f32) -> f32 {
    0.1 + 10.0 * v
}

pub struct Tremolo {
    lfo: Lfo,
    sample_rate_recip: f32,
    offset: ParamRamp,
    mix: ParamRamp,
}

impl Tremolo {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            SAMPLE_RATE
        };
        let mut fx = Self {
            lfo: Lfo::new(),
            sample_rate_recip: 1.0 / sample_rate,
            offset: ParamRamp::default(),
            mix: ParamRamp::default(),
        };
        fx.initialize(0, 0);
        fx
    }

    pub fn rate_hz(&self) -> f32 {
        self.lfo.w0() / self.sample_rate_recip
    }
}

impl Effect for Tremolo {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        self.lfo.reset();
        self.lfo.set_frequency(DEFAULT_RATE_HZ, self.sample_rate_recip);
        self.offset.snap(0.0);
        self.mix.snap(DEFAULT_MIX);
    }

    fn set_param(&mut self, index: u8, value: i32) {
        let v = q31_to_f32(value).clamp(0.0, 1.0);
        match FxParam::from_index(index) {
            Some(FxParam::Time) => self
                .lfo
                .set_frequency(rate_from_control(v), self.sample_rate_recip),
            Some(FxParam::Depth) => self.offset.set_target(v * v),
            Some(FxParam::ShiftDepth) => self.mix.set_target(v),
            None => {}
        }
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32], frames: usize) {
        let frames = frames_in(input.len().min(output.len()), frames);
        if frames == 0 {
            return;
        }
        self.offset.begin_block(frames);
        self.mix.begin_block(frames);

        for (dry, wet) in input[..frames * 2]
            .chunks_exact(2)
            .zip(output[..frames * 2].chunks_exact_mut(2))
        {
            self.lfo.advance();
            let offset = self.offset.next();
            let mix = self.mix.next();

            let left = bipolar_to_unipolar(self.lfo.sine_bi());
            let right = bipolar_to_unipolar(self.lfo.sine_bi_off(offset));
            wet[0] = amplitude_modulate(dry[0], left, mix);
            wet[1] = amplitude_modulate(dry[1], right, mix);
        }
    }

    fn name(&self) -> &'static str {
        "tremolo"
    }
}
