//! The callback contract between a host audio engine and the modules.
//!
//! A host drives every module through the same small set of events:
//! initialize once, then interleave parameter changes, note events (voices
//! only) and block processing. `process_block` is the hot path and must not
//! allocate, block or fail; out-of-range input is clamped, never rejected.
//!
//! Audio buffers are interleaved stereo (`[l0, r0, l1, r1, ...]`). A module
//! asked for more frames than its buffers hold processes only the frames
//! that fit, and zero frames is a no-op.

#[cfg(feature = "rtrb")]
pub mod control;
pub mod message;
pub mod rack;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::io::converter::{note_to_freq, q31_to_f32, NOTE_MAX_HZ};

#[cfg(feature = "rtrb")]
pub use control::{ControlError, Controller};
pub use message::{HostMessage, MessageReceiver};
pub use rack::Rack;

/// Pitch as delivered by the host: a MIDI note plus a fraction of the way to
/// the next note in 1/255 steps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub note: u8,
    pub fine: u8,
}

impl Pitch {
    pub const fn new(note: u8, fine: u8) -> Self {
        Self { note, fine }
    }

    /// Unpack the host's `note << 8 | fine` word.
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            note: (raw >> 8) as u8,
            fine: (raw & 0xFF) as u8,
        }
    }

    pub const fn to_raw(self) -> u16 {
        ((self.note as u16) << 8) | self.fine as u16
    }

    /// Frequency in Hz, interpolated linearly between `note` and `note + 1`.
    ///
    /// # Example
    /// ```
    /// use pluck_dsp::host::Pitch;
    /// assert_eq!(Pitch::new(45, 0).frequency(), 110.0);
    /// let halfway = Pitch::new(69, 128).frequency();
    /// assert!(halfway > 440.0 && halfway < 466.17);
    /// ```
    pub fn frequency(self) -> f32 {
        let f0 = note_to_freq(self.note as f32);
        if self.fine == 0 {
            return f0.min(NOTE_MAX_HZ);
        }
        let f1 = note_to_freq(self.note as f32 + 1.0);
        let hz = f0 + (f1 - f0) * (self.fine as f32 / 255.0);
        hz.min(NOTE_MAX_HZ)
    }

    /// Normalized frequency (cycles per sample).
    pub fn w0(self, sample_rate_recip: f32) -> f32 {
        self.frequency() * sample_rate_recip
    }
}

impl Default for Pitch {
    fn default() -> Self {
        // A4
        Self::new(69, 0)
    }
}

/// Per-block parameters the host hands to a voice.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleParams {
    pub pitch: Pitch,
    /// The host shape-LFO value for this block, in [-1, 1].
    pub shape_lfo: f32,
}

impl CycleParams {
    /// Build from the host's raw pitch word and q31 LFO value.
    pub fn from_raw(pitch: u16, shape_lfo: i32) -> Self {
        Self {
            pitch: Pitch::from_raw(pitch),
            shape_lfo: q31_to_f32(shape_lfo),
        }
    }
}

/// Parameter slots of a voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscParam {
    /// User parameters 1 through 6.
    Id(u8),
    Shape,
    ShiftShape,
}

impl OscParam {
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0..=5 => Some(OscParam::Id(index as u8 + 1)),
            6 => Some(OscParam::Shape),
            7 => Some(OscParam::ShiftShape),
            _ => None,
        }
    }

    pub fn index(self) -> u16 {
        match self {
            OscParam::Id(n) => n.clamp(1, 6) as u16 - 1,
            OscParam::Shape => 6,
            OscParam::ShiftShape => 7,
        }
    }
}

/// Parameter slots of an effect.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxParam {
    Time,
    Depth,
    ShiftDepth,
}

impl FxParam {
    pub const ALL: [FxParam; 3] = [FxParam::Time, FxParam::Depth, FxParam::ShiftDepth];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(FxParam::Time),
            1 => Some(FxParam::Depth),
            2 => Some(FxParam::ShiftDepth),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            FxParam::Time => 0,
            FxParam::Depth => 1,
            FxParam::ShiftDepth => 2,
        }
    }
}

/// A sound source that reacts to notes.
pub trait Oscillator: Send {
    /// Re-establish default state. Never allocates.
    fn initialize(&mut self, platform: u32, api: u32);

    fn note_on(&mut self, pitch: Pitch);

    /// Default implementation does nothing: voices keep ringing.
    fn note_off(&mut self, _pitch: Pitch) {}

    /// Apply a raw control value; unknown indices are ignored.
    fn set_param(&mut self, index: u16, value: u16);

    /// Render `frames` stereo frames into `output` (mono, duplicated).
    fn process_block(&mut self, cycle: &CycleParams, output: &mut [f32], frames: usize);

    fn name(&self) -> &'static str;
}

/// A stereo effect in the signal chain.
pub trait Effect: Send {
    fn initialize(&mut self, platform: u32, api: u32);

    /// Apply a raw q31 control value; unknown indices are ignored.
    fn set_param(&mut self, index: u8, value: i32);

    /// Process `frames` stereo frames from `input` into `output`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32], frames: usize);

    fn name(&self) -> &'static str;
}

/// Number of stereo frames that can safely be processed.
#[inline]
pub(crate) fn frames_in(buffer_len: usize, frames: usize) -> usize {
    frames.min(buffer_len / 2)
}
