use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::host::Pitch;

/// Control events queued for the audio thread.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostMessage {
    NoteOn(Pitch),
    NoteOff(Pitch),
    /// Raw 10-bit value for the active voice.
    VoiceParam { index: u16, value: u16 },
    /// Raw q31 value for the effect in `slot`.
    EffectParam { slot: usize, index: u8, value: i32 },
    SelectVoice(usize),
    ToggleEffect(usize),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<HostMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<HostMessage> {
    fn pop(&mut self) -> Option<HostMessage> {
        Consumer::pop(self).ok()
    }
}

/// Offline rendering and tests push straight into a deque.
impl MessageReceiver for VecDeque<HostMessage> {
    fn pop(&mut self) -> Option<HostMessage> {
        self.pop_front()
    }
}
