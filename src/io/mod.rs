// Purpose - host-facing value formats and MIDI input

pub mod converter;
pub mod midi;
