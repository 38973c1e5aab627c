//! Autopan: the tremolo gain stage with a selectable LFO shape and the right
//! channel running at a phase offset from the left.

use crate::{
    dsp::{
        lfo::{bipolar_to_unipolar, Lfo, LfoWaveform},
        modulate::amplitude_modulate,
        ramp::ParamRamp,
    },
    effects::tremolo::rate_from_control,
    host::{frames_in, Effect, FxParam},
    io::converter::q31_to_f32,
    SAMPLE_RATE,
};

pub const DEFAULT_RATE_HZ: f32 = 1.0;
/// Channels start half a cycle apart.
pub const DEFAULT_OFFSET: f32 = 0.5;
const MIX: f32 = 0.5;

pub struct Autopan {
    lfo: Lfo,
    sample_rate_recip: f32,
    waveform: LfoWaveform,
    offset: ParamRamp,
}

impl Autopan {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            SAMPLE_RATE
        };
        let mut fx = Self {
            lfo: Lfo::new(),
            sample_rate_recip: 1.0 / sample_rate,
            waveform: LfoWaveform::Sine,
            offset: ParamRamp::default(),
        };
        fx.initialize(0, 0);
        fx
    }

    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }
}

impl Effect for Autopan {
    fn initialize(&mut self, _platform: u32, _api: u32) {
        self.lfo.reset();
        self.lfo.set_frequency(DEFAULT_RATE_HZ, self.sample_rate_recip);
        self.waveform = LfoWaveform::Sine;
        self.offset.snap(DEFAULT_OFFSET);
    }

    fn set_param(&mut self, index: u8, value: i32) {
        let v = q31_to_f32(value).clamp(0.0, 1.0);
        match FxParam::from_index(index) {
            Some(FxParam::Time) => self.waveform = LfoWaveform::from_control(v),
            Some(FxParam::Depth) => self.offset.set_target(v),
            Some(FxParam::ShiftDepth) => self
                .lfo
                .set_frequency(rate_from_control(v), self.sample_rate_recip),
            None => {}
        }
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32], frames: usize) {
        let frames = frames_in(input.len().min(output.len()), frames);
        if frames == 0 {
            return;
        }
        self.offset.begin_block(frames);

        for (dry, wet) in input[..frames * 2]
            .chunks_exact(2)
            .zip(output[..frames * 2].chunks_exact_mut(2))
        {
            self.lfo.advance();
            let offset = self.offset.next();

            let left = bipolar_to_unipolar(self.lfo.bipolar(self.waveform));
            let right = bipolar_to_unipolar(self.lfo.bipolar_off(self.waveform, offset));
            wet[0] = amplitude_modulate(dry[0], left, MIX);
            wet[1] = amplitude_modulate(dry[1], right, MIX);
        }
    }

    fn name(&self) -> &'static str {
        "autopan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::converter::f32_to_q31;

    #[test]
    fn test_time_selects_waveform() {
        let mut fx = Autopan::new(48_000.0);
        assert_eq!(fx.waveform(), LfoWaveform::Sine);
        fx.set_param(FxParam::Time.index(), f32_to_q31(0.4));
        assert_eq!(fx.waveform(), LfoWaveform::Triangle);
        fx.set_param(FxParam::Time.index(), f32_to_q31(0.6));
        assert_eq!(fx.waveform(), LfoWaveform::Saw);
        fx.set_param(FxParam::Time.index(), i32::MAX);
        assert_eq!(fx.waveform(), LfoWaveform::Square);
    }

    #[test]
    fn test_right_channel_is_phase_shifted_left() {
        let mut fx = Autopan::new(48_000.0);
        fx.set_param(FxParam::Depth.index(), f32_to_q31(0.25));
        fx.set_param(FxParam::ShiftDepth.index(), f32_to_q31(0.99));

        let input = vec![1.0; 2 * 9600];
        let mut output = vec![0.0; 2 * 9600];
        // Let the offset ramp settle
        fx.process_block(&input, &mut output[..2 * 64], 64);
        fx.process_block(&input, &mut output, 9600);

        let lag = (0.25 / fx.lfo.w0()).round() as usize;
        for n in 0..9600 - lag {
            let right = output[2 * n + 1];
            let left_later = output[2 * (n + lag)];
            assert!((right - left_later).abs() < 1e-2, "frame {n}");
        }
    }

    #[test]
    fn test_square_pans_between_two_levels() {
        let mut fx = Autopan::new(48_000.0);
        fx.set_param(FxParam::Time.index(), i32::MAX);
        let input = vec![0.8; 2 * 48_000];
        let mut output = vec![0.0; 2 * 48_000];
        fx.process_block(&input, &mut output, 48_000);
        // Square wave: the level only ever sits at half or full
        for &s in &output {
            assert!((s - 0.4).abs() < 1e-6 || (s - 0.8).abs() < 1e-6, "{s}");
        }
        assert!(output.iter().any(|&s| (s - 0.4).abs() < 1e-6));
    }
}
