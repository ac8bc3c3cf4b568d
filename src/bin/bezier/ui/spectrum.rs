//! Spectrum view
//!
//! Linear frequency axis: an oscillator's harmonics sit at whole multiples of
//! its pitch, so even spacing makes the harmonic series easy to read.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, sync::Arc};

/// Highest frequency shown (Hz)
const DISPLAY_MAX_HZ: f32 = 8_000.0;
/// Floor for the magnitude axis (dB)
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    /// Hann window coefficients
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// Hz per FFT bin
    bin_hz: f32,
    /// (frequency_hz, magnitude_db) for every displayed bin
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = fft_len.saturating_sub(1).max(1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / denom).cos()))
            .collect();

        let bin_hz = sample_rate / fft_len.max(1) as f32;
        let max_hz = DISPLAY_MAX_HZ.min(sample_rate / 2.0);
        let bins = ((max_hz / bin_hz) as usize).clamp(1, (fft_len / 2).max(1));
        let spectrum = (0..bins)
            .map(|i| ((i as f32 * bin_hz) as f64, FLOOR_DB))
            .collect();

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bin_hz,
            spectrum,
        }
    }

    /// Recompute from `buffer`; ignored unless it matches the FFT size
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (i, (freq, db)) in self.spectrum.iter_mut().enumerate() {
            let power = self.scratch[i].norm_sqr().max(1e-12);
            *freq = (i as f32 * self.bin_hz) as f64;
            *db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let max_freq = spectrum.last().map_or(1.0, |(f, _)| f.max(1.0));
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
