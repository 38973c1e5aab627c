//! Status line and knob list

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use super::Knob;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Everything the panel draws, borrowed from the UI state
pub struct PanelView<'a> {
    pub voice: &'static str,
    pub effects: &'a [&'static str],
    pub effects_enabled: &'a [bool],
    pub knobs: &'a [Knob],
    pub focus: usize,
    pub octave: i8,
    pub last_note: Option<u8>,
    pub sample_rate: f32,
    pub dropped: usize,
}

pub fn render_panel(frame: &mut Frame, area: Rect, view: &PanelView, stats: &AudioStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_status(frame, chunks[0], view, stats);
    render_knobs(frame, chunks[1], view);

    let level = Gauge::default()
        .block(Block::default().title(" Peak ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(stats.peak.clamp(0.0, 1.0) as f64);
    frame.render_widget(level, chunks[2]);
}

fn render_status(frame: &mut Frame, area: Rect, view: &PanelView, stats: &AudioStats) {
    let mut spans = vec![
        Span::styled(
            format!(" {}  ", view.voice),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("oct {}  ", view.octave),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            match view.last_note {
                Some(note) => format!("note {note}  "),
                None => "note -  ".to_string(),
            },
            Style::default().fg(Color::White),
        ),
    ];

    for (i, (name, on)) in view.effects.iter().zip(view.effects_enabled).enumerate() {
        let color = if *on { Color::Green } else { Color::DarkGray };
        spans.push(Span::styled(
            format!("[{}] {}  ", i + 1, name),
            Style::default().fg(color),
        ));
    }

    spans.push(Span::styled(
        format!("{:.1}kHz  ", view.sample_rate / 1000.0),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::styled(
        format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
        Style::default().fg(Color::Magenta),
    ));
    if view.dropped > 0 {
        spans.push(Span::styled(
            format!("  dropped: {}", view.dropped),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default().title(" pluckbox ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_knobs(frame: &mut Frame, area: Rect, view: &PanelView) {
    const BAR_WIDTH: usize = 20;

    let items: Vec<ListItem> = view
        .knobs
        .iter()
        .enumerate()
        .map(|(i, knob)| {
            let filled = (knob.value * BAR_WIDTH as f32).round() as usize;
            let bar = format!(
                "{:<18} {}{} {:.2}",
                knob.label,
                "█".repeat(filled),
                "·".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                knob.value
            );
            let style = if i == view.focus {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(bar).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Knobs ").borders(Borders::ALL));
    frame.render_widget(list, area);
}
