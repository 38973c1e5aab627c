//! Terminal UI: scope, spectrum and a knob panel
//!
//! The UI thread owns the `Controller` and never touches the rack directly.
//! It mirrors what it has sent (active voice, effect toggles, knob values)
//! so it can draw them without asking the audio thread.

mod panel;
mod spectrum;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use pluck_dsp::host::{ControlError, Controller, FxParam, OscParam};

use crate::keys::{action_for, clamp_octave, Action, DEFAULT_OCTAVE};
use panel::{render_panel, AudioStats};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Samples shown by the scope and fed to the analyzer
pub const VIS_BUFFER_SIZE: usize = 1024;
const KNOB_STEP: f32 = 0.05;

/// Static description of the rack, gathered before it moves to the audio thread
pub struct UiInit {
    pub sample_rate: f32,
    pub voices: Vec<&'static str>,
    pub effects: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnobTarget {
    Voice(OscParam),
    Effect(usize, FxParam),
}

#[derive(Debug, Clone)]
pub struct Knob {
    pub label: String,
    pub target: KnobTarget,
    pub value: f32,
}

fn knobs_for(effects: &[&'static str]) -> Vec<Knob> {
    let voice = [
        ("shape", OscParam::Shape),
        ("shift-shape", OscParam::ShiftShape),
        ("param 1", OscParam::Id(1)),
        ("param 2", OscParam::Id(2)),
        ("param 3", OscParam::Id(3)),
        ("param 4", OscParam::Id(4)),
    ];
    let mut knobs: Vec<Knob> = voice
        .iter()
        .map(|&(label, param)| Knob {
            label: label.to_string(),
            target: KnobTarget::Voice(param),
            value: 0.5,
        })
        .collect();

    for (slot, name) in effects.iter().enumerate() {
        for (param, label) in FxParam::ALL.iter().zip(["time", "depth", "shift"]) {
            knobs.push(Knob {
                label: format!("{name} {label}"),
                target: KnobTarget::Effect(slot, *param),
                value: 0.5,
            });
        }
    }
    knobs
}

pub struct UiApp {
    controller: Controller,
    scope_rx: Consumer<f32>,
    init: UiInit,
    scope: Vec<f32>,
    analyzer: SpectrumAnalyzer,
    knobs: Vec<Knob>,
    focus: usize,
    octave: i8,
    active_voice: usize,
    effects_enabled: Vec<bool>,
    last_note: Option<u8>,
    dropped: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(controller: Controller, scope_rx: Consumer<f32>, init: UiInit) -> Self {
        let knobs = knobs_for(&init.effects);
        let effects_enabled = vec![false; init.effects.len()];
        Self {
            controller,
            scope_rx,
            analyzer: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate),
            init,
            scope: vec![0.0; VIS_BUFFER_SIZE],
            knobs,
            focus: 0,
            octave: DEFAULT_OCTAVE,
            active_voice: 0,
            effects_enabled,
            last_note: None,
            dropped: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.analyzer.update(&self.scope);

            terminal.draw(|frame| self.render(frame))?;

            // ~60 fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = action_for(key.code, self.octave) {
                            self.apply(action);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Keep the most recent `VIS_BUFFER_SIZE` samples.
    fn poll_scope(&mut self) {
        let available = self.scope_rx.slots();
        if available == 0 {
            return;
        }
        let keep = available.min(VIS_BUFFER_SIZE);
        self.scope.drain(..keep);
        for _ in 0..available - keep {
            let _ = self.scope_rx.pop();
        }
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
    }

    fn apply(&mut self, action: Action) {
        let sent = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::Note(pitch) => {
                self.last_note = Some(pitch.note);
                self.controller.note_on(pitch)
            }
            Action::OctaveDown => {
                self.octave = clamp_octave(self.octave - 1);
                Ok(())
            }
            Action::OctaveUp => {
                self.octave = clamp_octave(self.octave + 1);
                Ok(())
            }
            Action::NextVoice => {
                let count = self.init.voices.len().max(1);
                self.active_voice = (self.active_voice + 1) % count;
                self.controller.select_voice(self.active_voice)
            }
            Action::ToggleEffect(slot) if slot < self.effects_enabled.len() => {
                self.effects_enabled[slot] = !self.effects_enabled[slot];
                self.controller.toggle_effect(slot)
            }
            Action::ToggleEffect(_) => Ok(()),
            Action::NextKnob => {
                self.focus = (self.focus + 1) % self.knobs.len();
                Ok(())
            }
            Action::PrevKnob => {
                self.focus = (self.focus + self.knobs.len() - 1) % self.knobs.len();
                Ok(())
            }
            Action::Increase => self.nudge_knob(KNOB_STEP),
            Action::Decrease => self.nudge_knob(-KNOB_STEP),
        };

        if let Err(ControlError::QueueFull(_)) = sent {
            self.dropped += 1;
        }
    }

    fn nudge_knob(&mut self, delta: f32) -> Result<(), ControlError> {
        let knob = &mut self.knobs[self.focus];
        knob.value = (knob.value + delta).clamp(0.0, 1.0);
        match knob.target {
            KnobTarget::Voice(param) => self.controller.voice_param(param, knob.value),
            KnobTarget::Effect(slot, param) => {
                self.controller.effect_param(slot, param, knob.value)
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Panel
                Constraint::Length(10), // Scope + spectrum
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let panel = panel::PanelView {
            voice: self
                .init
                .voices
                .get(self.active_voice)
                .copied()
                .unwrap_or("-"),
            effects: &self.init.effects,
            effects_enabled: &self.effects_enabled,
            knobs: &self.knobs,
            focus: self.focus,
            octave: self.octave,
            last_note: self.last_note,
            sample_rate: self.init.sample_rate,
            dropped: self.dropped,
        };
        render_panel(frame, chunks[0], &panel, &AudioStats::from_buffer(&self.scope));

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        render_waveform(frame, scopes[0], &self.scope);
        render_spectrum(frame, scopes[1], self.analyzer.data());

        let help = Paragraph::new(
            " [a-k] Play  [z/x] Octave  [v] Voice  [1-9] Effect  [Tab] Knob  [↑/↓] Turn  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
