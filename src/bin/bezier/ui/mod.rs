//! TUI module for bezier
//!
//! Shows the current waveform table, the live output and its spectrum, and
//! turns key presses into control messages for the audio thread.

mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;
use tracing::warn;

use bezier_dsp::{dsp::wavetable::BezierTable, synth::ControlMessage, BezierConfig};

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT size)
const VIS_BUFFER_SIZE: usize = 1024;
/// Shape change per arrow key press
const SHAPE_STEP: f32 = 0.05;
/// One equal-tempered semitone
const SEMITONE: f32 = 1.059_463_1;

/// UI application state
pub struct UiApp {
    /// Ring buffer sender for parameter changes
    control_tx: Producer<ControlMessage>,
    /// Ring buffer receiver for rendered samples
    audio_rx: Consumer<f32>,
    /// Most recent output samples, oldest first
    audio_buffer: Vec<f32>,
    /// UI-side copy of the table, rebuilt alongside the audio thread's
    table: BezierTable,
    spectrum: SpectrumAnalyzer,
    frequency: f32,
    shape: f32,
    sample_rate: f32,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        audio_rx: Consumer<f32>,
        config: BezierConfig,
    ) -> EyreResult<Self> {
        let table = BezierTable::new(config.resolution, config.shape, config.control_y)
            .wrap_err("failed to build display table")?;

        Ok(Self {
            control_tx,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            table,
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, config.sample_rate),
            frequency: config.frequency,
            shape: config.shape,
            sample_rate: config.sample_rate,
            should_quit: false,
        })
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pull new samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        if let Ok(chunk) = self.audio_rx.read_chunk(available) {
            let (first, second) = chunk.as_slices();
            self.audio_buffer.extend_from_slice(first);
            self.audio_buffer.extend_from_slice(second);
            chunk.commit_all();
        }

        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.set_shape(self.shape - SHAPE_STEP),
            KeyCode::Right => self.set_shape(self.shape + SHAPE_STEP),
            KeyCode::Up => self.set_frequency(self.frequency * SEMITONE),
            KeyCode::Down => self.set_frequency(self.frequency / SEMITONE),
            KeyCode::Char('r') | KeyCode::Char('R') => self.send(ControlMessage::Reset),
            _ => {}
        }
    }

    fn set_shape(&mut self, shape: f32) {
        self.shape = shape.clamp(0.0, 1.0);
        self.table.retabulate(self.shape);
        self.send(ControlMessage::SetShape(self.shape));
    }

    fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.clamp(20.0, 20_000.0);
        self.send(ControlMessage::SetFrequency(self.frequency));
    }

    fn send(&mut self, msg: ControlMessage) {
        if self.control_tx.push(msg).is_err() {
            warn!(?msg, "control queue full, dropping message");
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Table
                Constraint::Length(8), // Output scope
                Constraint::Length(8), // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            chunks[0],
            self.frequency,
            self.shape,
            self.sample_rate,
            &stats,
        );
        render_waveform(frame, chunks[1], " Table ", self.table.table(), Color::Yellow);
        render_waveform(frame, chunks[2], " Output ", &self.audio_buffer, Color::Cyan);
        render_spectrum(frame, chunks[3], self.spectrum.data());

        let help = Paragraph::new(" [←/→] Shape  [↑/↓] Pitch  [R] Reset phase  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
