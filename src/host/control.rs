//! UI-side handle for sending control events to the audio thread.

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use thiserror::Error;

use crate::host::{FxParam, HostMessage, OscParam, Pitch};
use crate::io::converter::{f32_to_param_val, f32_to_q31};

#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    /// The audio thread has not drained the queue; the message was dropped.
    #[error("control queue is full, dropped {0:?}")]
    QueueFull(HostMessage),
}

pub struct Controller {
    tx: Producer<HostMessage>,
}

impl Controller {
    /// Create a controller and the matching receiver for a `Rack`.
    pub fn channel(capacity: usize) -> (Self, Consumer<HostMessage>) {
        let (tx, rx) = RingBuffer::new(capacity.max(1));
        (Self { tx }, rx)
    }

    pub fn send(&mut self, msg: HostMessage) -> Result<(), ControlError> {
        self.tx.push(msg).map_err(|PushError::Full(msg)| {
            tracing::warn!(?msg, "control queue full");
            ControlError::QueueFull(msg)
        })
    }

    pub fn note_on(&mut self, pitch: Pitch) -> Result<(), ControlError> {
        self.send(HostMessage::NoteOn(pitch))
    }

    pub fn note_off(&mut self, pitch: Pitch) -> Result<(), ControlError> {
        self.send(HostMessage::NoteOff(pitch))
    }

    /// Set a voice parameter from a normalized `[0, 1]` value.
    pub fn voice_param(&mut self, param: OscParam, value: f32) -> Result<(), ControlError> {
        self.send(HostMessage::VoiceParam {
            index: param.index(),
            value: f32_to_param_val(value),
        })
    }

    /// Set an effect parameter from a normalized `[0, 1]` value.
    pub fn effect_param(
        &mut self,
        slot: usize,
        param: FxParam,
        value: f32,
    ) -> Result<(), ControlError> {
        self.send(HostMessage::EffectParam {
            slot,
            index: param.index(),
            value: f32_to_q31(value),
        })
    }

    pub fn select_voice(&mut self, index: usize) -> Result<(), ControlError> {
        tracing::debug!(index, "select voice");
        self.send(HostMessage::SelectVoice(index))
    }

    pub fn toggle_effect(&mut self, slot: usize) -> Result<(), ControlError> {
        tracing::debug!(slot, "toggle effect");
        self.send(HostMessage::ToggleEffect(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MessageReceiver;

    #[test]
    fn test_messages_arrive_in_order() {
        let (mut ctl, mut rx) = Controller::channel(8);
        ctl.note_on(Pitch::new(60, 0)).unwrap();
        ctl.voice_param(OscParam::Shape, 1.0).unwrap();
        ctl.effect_param(1, FxParam::Depth, 0.5).unwrap();

        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(HostMessage::NoteOn(Pitch::new(60, 0)))
        );
        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(HostMessage::VoiceParam {
                index: 6,
                value: 1023
            })
        );
        assert_eq!(
            MessageReceiver::pop(&mut rx),
            Some(HostMessage::EffectParam {
                slot: 1,
                index: 1,
                value: 1 << 30
            })
        );
        assert_eq!(MessageReceiver::pop(&mut rx), None);
    }

    #[test]
    fn test_full_queue_returns_message() {
        let (mut ctl, _rx) = Controller::channel(1);
        ctl.select_voice(1).unwrap();
        let err = ctl.toggle_effect(0).unwrap_err();
        assert_eq!(err, ControlError::QueueFull(HostMessage::ToggleEffect(0)));
        assert!(err.to_string().contains("full"));
    }
}
