//! Computer keyboard as a one-octave piano
//!
//!   w e   t y u
//!  a s d f g h j k
//!
//! `a` is C of the current octave, `k` the C above.

use crossterm::event::KeyCode;
use pluck_dsp::host::Pitch;

pub const DEFAULT_OCTAVE: i8 = 3;
const MIN_OCTAVE: i8 = -1;
const MAX_OCTAVE: i8 = 8;

/// Semitone offset above C for a piano key.
fn semitone(key: char) -> Option<u8> {
    let offset = match key {
        'a' => 0,
        'w' => 1,
        's' => 2,
        'e' => 3,
        'd' => 4,
        'f' => 5,
        't' => 6,
        'g' => 7,
        'y' => 8,
        'h' => 9,
        'u' => 10,
        'j' => 11,
        'k' => 12,
        _ => return None,
    };
    Some(offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Note(Pitch),
    OctaveDown,
    OctaveUp,
    NextVoice,
    ToggleEffect(usize),
    NextKnob,
    PrevKnob,
    Increase,
    Decrease,
}

/// Translate a key press given the current octave.
pub fn action_for(key: KeyCode, octave: i8) -> Option<Action> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('z') => Some(Action::OctaveDown),
        KeyCode::Char('x') => Some(Action::OctaveUp),
        KeyCode::Char('v') => Some(Action::NextVoice),
        KeyCode::Char(c @ '1'..='9') => Some(Action::ToggleEffect(c as usize - '1' as usize)),
        KeyCode::Tab => Some(Action::NextKnob),
        KeyCode::BackTab => Some(Action::PrevKnob),
        KeyCode::Up | KeyCode::Right => Some(Action::Increase),
        KeyCode::Down | KeyCode::Left => Some(Action::Decrease),
        KeyCode::Char(c) => {
            let note = (octave as i16 + 1) * 12 + semitone(c)? as i16;
            u8::try_from(note)
                .ok()
                .filter(|n| *n <= 127)
                .map(|n| Action::Note(Pitch::new(n, 0)))
        }
        _ => None,
    }
}

pub fn clamp_octave(octave: i8) -> i8 {
    octave.clamp(MIN_OCTAVE, MAX_OCTAVE)
}
