//! Conversions between raw host control words and normalized floats.
//!
//! Hosts deliver voice parameters as 10-bit integers, effect parameters and
//! the shape LFO as q31 fixed point, and pitch as MIDI notes. Everything
//! inside the DSP code is `f32`, so these functions sit at the seam.

use crate::host::{FxParam, HostMessage, OscParam, Pitch};
use crate::io::midi::MidiEvent;

/// Highest frequency a note can map to (top of the host's note table).
pub const NOTE_MAX_HZ: f32 = 23_679.64;

const PARAM_MAX: u16 = 1023;
const Q31_SCALE: f32 = 2_147_483_648.0;

/// 10-bit control value to `[0, 1]`. Values above 1023 saturate.
#[inline]
pub fn param_val_to_f32(value: u16) -> f32 {
    value.min(PARAM_MAX) as f32 / PARAM_MAX as f32
}

/// `[0, 1]` to the nearest 10-bit control value.
#[inline]
pub fn f32_to_param_val(value: f32) -> u16 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * PARAM_MAX as f32).round() as u16
}

/// q31 fixed point to `[-1, 1)`.
#[inline]
pub fn q31_to_f32(value: i32) -> f32 {
    value as f32 / Q31_SCALE
}

/// `[-1, 1]` to q31, saturating at both ends. NaN maps to zero.
///
/// # Example
/// ```
/// use pluck_dsp::io::converter::{f32_to_q31, q31_to_f32};
/// assert_eq!(f32_to_q31(1.0), i32::MAX);
/// assert_eq!(f32_to_q31(-4.0), i32::MIN);
/// assert!((q31_to_f32(f32_to_q31(0.25)) - 0.25).abs() < 1e-7);
/// ```
#[inline]
pub fn f32_to_q31(value: f32) -> i32 {
    // `as` saturates and maps NaN to 0
    (value.clamp(-1.0, 1.0) * Q31_SCALE) as i32
}

/// Centred 0..=200 control to `[-1, 1]`.
#[inline]
pub fn bipolar_param(value: u16) -> f32 {
    ((value as f32 - 100.0) * 0.01).clamp(-1.0, 1.0)
}

/// Equal-tempered frequency of a (possibly fractional) MIDI note, A4 = 440 Hz.
#[inline]
pub fn note_to_freq(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}

/// 7-bit MIDI data byte to `[0, 1]`.
#[inline]
fn midi_unit(value: u8) -> f32 {
    value.min(127) as f32 / 127.0
}

/// Translate a MIDI event on `channel_filter` into a rack message. Events on
/// other channels and unmapped controllers give `None`.
///
/// # Example
/// ```
/// use std::collections::VecDeque;
/// use pluck_dsp::host::{HostMessage, Pitch, Rack};
/// use pluck_dsp::io::{converter::midi_to_message, midi::MidiEvent};
/// use pluck_dsp::RackConfig;
///
/// let mut queue = VecDeque::new();
/// for bytes in [[0x90u8, 45, 100], [0xB0, 70, 127], [0x91, 60, 100]] {
///     if let Some(msg) = MidiEvent::parse(&bytes).and_then(|e| midi_to_message(e, 0)) {
///         queue.push_back(msg);
///     }
/// }
/// // The note on the second channel is filtered out
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue[0], HostMessage::NoteOn(Pitch::new(45, 0)));
///
/// let mut rack = Rack::standard(&RackConfig::default(), queue);
/// let mut out = vec![0.0; 2 * 256];
/// rack.render(&mut out);
/// assert!(out.iter().any(|s| s.abs() > 0.0));
/// ```
pub fn midi_to_message(midi: MidiEvent, channel_filter: u8) -> Option<HostMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter => {
            let pitch = Pitch::new(key, 0);
            if velocity == 0 {
                Some(HostMessage::NoteOff(pitch))
            } else {
                Some(HostMessage::NoteOn(pitch))
            }
        }
        MidiEvent::NoteOff { channel, key, .. } if channel == channel_filter => {
            Some(HostMessage::NoteOff(Pitch::new(key, 0)))
        }
        MidiEvent::ControlChange {
            channel,
            controller,
            value,
        } if channel == channel_filter => {
            let unit = midi_unit(value);
            let voice = |param: OscParam| HostMessage::VoiceParam {
                index: param.index(),
                value: f32_to_param_val(unit),
            };
            let effect = |param: FxParam| HostMessage::EffectParam {
                slot: 0,
                index: param.index(),
                value: f32_to_q31(unit),
            };
            match controller {
                70 => Some(voice(OscParam::Shape)),
                71 => Some(voice(OscParam::ShiftShape)),
                72 => Some(effect(FxParam::Time)),
                73 => Some(effect(FxParam::Depth)),
                74 => Some(effect(FxParam::ShiftDepth)),
                _ => None,
            }
        }
        _ => None,
    }
}
