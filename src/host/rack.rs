//! Host-side runner: one active voice followed by a chain of effects.

/*
Rack
====

The rack plays the role of the host firmware. It owns every module, feeds
them control events, and calls them block by block:

    messages ──► drain at block start
                      │
    ┌───────────┐   ┌─▼─────────┐   ┌──────────┐   ┌──────────┐
    │ shape LFO ├──►│  voice    ├──►│ effect 0 ├──►│ effect 1 ├──► out
    └───────────┘   └───────────┘   └──────────┘   └──────────┘
                     (one active)    (skipped when disabled)

A render call is split into blocks of `block_size` frames. The shape LFO is
sampled once per block and handed to the voice in `CycleParams`, which
ramps it across the block itself.

Effects read from a scratch copy of the block and write back into the
output. The scratch buffer is sized once for `MAX_BLOCK_SIZE`, so nothing
is allocated on the audio thread.
*/

use crate::{
    config::RackConfig,
    dsp::lfo::Lfo,
    effects::{Autopan, Bitcrusher, Tremolo},
    host::{CycleParams, Effect, HostMessage, MessageReceiver, Oscillator, Pitch},
    voices::{PluckedString, VanDerPol, Wavefolder},
    MAX_BLOCK_SIZE,
};

struct EffectSlot {
    effect: Box<dyn Effect>,
    enabled: bool,
}

pub struct Rack<R: MessageReceiver> {
    voices: Vec<Box<dyn Oscillator>>,
    active: usize,
    effects: Vec<EffectSlot>,
    shape_lfo: Lfo,
    shape_lfo_depth: f32,
    pitch: Pitch,
    block_size: usize,
    scratch: Vec<f32>,
    rx: R,
}

impl<R: MessageReceiver> Rack<R> {
    /// Empty rack. Add modules with [`with_voice`](Self::with_voice) and
    /// [`with_effect`](Self::with_effect).
    pub fn new(config: &RackConfig, rx: R) -> Self {
        let mut shape_lfo = Lfo::new();
        shape_lfo.set_frequency(config.shape_lfo_hz, 1.0 / config.effective_sample_rate());

        Self {
            voices: Vec::new(),
            active: 0,
            effects: Vec::new(),
            shape_lfo,
            shape_lfo_depth: config.effective_lfo_depth(),
            pitch: Pitch::default(),
            block_size: config.effective_block_size(),
            scratch: vec![0.0; MAX_BLOCK_SIZE * 2],
            rx,
        }
    }

    /// Rack with every voice and effect in the crate. Effects start disabled.
    pub fn standard(config: &RackConfig, rx: R) -> Self {
        let fs = config.effective_sample_rate();
        let rack = Self::new(config, rx)
            .with_voice(Box::new(PluckedString::with_seed(fs, config.noise_seed)))
            .with_voice(Box::new(Wavefolder::new(fs)))
            .with_voice(Box::new(VanDerPol::new(fs)))
            .with_effect(Box::new(Bitcrusher::new(fs)), false)
            .with_effect(Box::new(Tremolo::new(fs)), false)
            .with_effect(Box::new(Autopan::new(fs)), false);

        tracing::info!(
            sample_rate = fs,
            block_size = rack.block_size,
            voices = rack.voices.len(),
            effects = rack.effects.len(),
            "rack ready"
        );
        rack
    }

    pub fn with_voice(mut self, mut voice: Box<dyn Oscillator>) -> Self {
        voice.initialize(0, 0);
        self.voices.push(voice);
        self
    }

    pub fn with_effect(mut self, mut effect: Box<dyn Effect>, enabled: bool) -> Self {
        effect.initialize(0, 0);
        self.effects.push(EffectSlot { effect, enabled });
        self
    }

    pub fn voice_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.voices.iter().map(|v| v.name())
    }

    pub fn effect_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.effects.iter().map(|slot| slot.effect.name())
    }

    pub fn active_voice(&self) -> usize {
        self.active
    }

    pub fn effect_enabled(&self, slot: usize) -> bool {
        self.effects.get(slot).is_some_and(|s| s.enabled)
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Apply one control event. Out-of-range slots are ignored.
    pub fn handle(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::NoteOn(pitch) => {
                self.pitch = pitch;
                if let Some(voice) = self.voices.get_mut(self.active) {
                    voice.note_on(pitch);
                }
            }
            HostMessage::NoteOff(pitch) => {
                if let Some(voice) = self.voices.get_mut(self.active) {
                    voice.note_off(pitch);
                }
            }
            HostMessage::VoiceParam { index, value } => {
                if let Some(voice) = self.voices.get_mut(self.active) {
                    voice.set_param(index, value);
                }
            }
            HostMessage::EffectParam { slot, index, value } => {
                if let Some(slot) = self.effects.get_mut(slot) {
                    slot.effect.set_param(index, value);
                }
            }
            HostMessage::SelectVoice(index) => {
                if index < self.voices.len() {
                    self.active = index;
                }
            }
            HostMessage::ToggleEffect(slot) => {
                if let Some(slot) = self.effects.get_mut(slot) {
                    slot.enabled = !slot.enabled;
                }
            }
        }
    }

    /// Render interleaved stereo into `out`, applying queued messages first.
    ///
    /// A trailing odd sample is zeroed.
    pub fn render(&mut self, out: &mut [f32]) {
        while let Some(msg) = self.rx.pop() {
            self.handle(msg);
        }

        for block in out.chunks_mut(self.block_size * 2) {
            let frames = block.len() / 2;
            let len = frames * 2;
            block[len..].fill(0.0);
            if frames == 0 {
                continue;
            }

            let cycle = CycleParams {
                pitch: self.pitch,
                shape_lfo: (self.shape_lfo.sine_bi() * self.shape_lfo_depth).clamp(-1.0, 1.0),
            };
            self.shape_lfo.advance_by(frames);

            match self.voices.get_mut(self.active) {
                Some(voice) => voice.process_block(&cycle, block, frames),
                None => block.fill(0.0),
            }

            for slot in self.effects.iter_mut().filter(|s| s.enabled) {
                self.scratch[..len].copy_from_slice(&block[..len]);
                slot.effect.process_block(&self.scratch[..len], &mut block[..len], frames);
            }
        }
    }
}
