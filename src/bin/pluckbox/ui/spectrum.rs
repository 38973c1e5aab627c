//! Spectrum analyzer widget
//!
//! Hann-windowed FFT folded into log-spaced bands. Each band shows the
//! loudest FFT bin it covers and falls back slowly, like a peak meter.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, ops::Range, sync::Arc};

const BANDS: usize = 48;
const MIN_HZ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// dB lost per update when a band gets quieter.
const FALL_DB: f64 = 3.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    bands: Vec<Range<usize>>,
    /// (band centre in Hz, level in dB)
    spectrum: Vec<(f64, f64)>,
}

/// Split FFT bins `1..half` into `count` log-spaced, non-empty ranges.
fn log_bands(fft_len: usize, sample_rate: f32, count: usize) -> Vec<(f64, Range<usize>)> {
    let half = (fft_len / 2).max(2);
    let bin_hz = sample_rate / fft_len as f32;
    let max_hz = (sample_rate / 2.0).min(20_000.0).max(MIN_HZ * 2.0);
    let ratio = max_hz / MIN_HZ;

    let edge = |i: usize| {
        let hz = MIN_HZ * ratio.powf(i as f32 / count as f32);
        ((hz / bin_hz).round() as usize).clamp(1, half - 1)
    };

    (0..count)
        .map(|i| {
            let lo = edge(i);
            let hi = edge(i + 1).max(lo + 1);
            let centre = (lo + hi) as f64 * 0.5 * bin_hz as f64;
            (centre, lo..hi)
        })
        .collect()
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);
        let denom = fft_len.saturating_sub(1).max(1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / denom).cos()))
            .collect();

        let (centres, bands): (Vec<f64>, Vec<Range<usize>>) =
            log_bands(fft_len, sample_rate, BANDS).into_iter().unzip();

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bands,
            spectrum: centres.into_iter().map(|hz| (hz, FLOOR_DB)).collect(),
        }
    }

    /// Analyze `buffer`; ignored unless it is exactly one FFT long.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = (self.window.len() as f32 * 0.5).powi(2);
        for (band, (_, level)) in self.bands.iter().zip(self.spectrum.iter_mut()) {
            let power = self.scratch[band.clone()]
                .iter()
                .map(|c| c.norm_sqr() / norm)
                .fold(1e-12f32, f32::max);
            let db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
            *level = db.max(*level - FALL_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    // Plot against log frequency so the bands are evenly spaced
    let data: Vec<(f64, f64)> = spectrum.iter().map(|&(hz, db)| (hz.log10(), db)).collect();
    let (lo, hi) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let x_bounds = if lo < hi { [lo, hi] } else { [0.0, 1.0] };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(x_bounds)
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
