//! Audio setup and the thread split between audio callback and UI

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use std::{fs::File, sync::Mutex};
use tracing::{error, info, level_filters::LevelFilter, Level};
use tracing_subscriber::{filter::Targets, fmt, prelude::*};

use bezier_dsp::{
    graph::{BezierNode, RenderCtx},
    synth::{ControlMessage, ControlledVoice},
    BezierConfig, MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Capacity of the UI -> audio control queue
const CONTROL_QUEUE: usize = 64;
/// Capacity of the audio -> UI sample queue
const SCOPE_QUEUE: usize = 16_384;

/// Library module whose events fire inside the audio callback
const AUDIO_THREAD_TARGET: &str = "bezier_dsp::dsp::wavetable";

/// Which events reach the log file.
///
/// The file writer locks and blocks, so nothing emitted from the render path
/// may pass: table rebuild events are switched off entirely.
fn log_targets() -> Targets {
    Targets::new()
        .with_target("bezier_dsp", Level::INFO)
        .with_target(AUDIO_THREAD_TARGET, LevelFilter::OFF)
        .with_default(Level::DEBUG)
}

/// Route `tracing` output to the file named by `BEZIER_LOG`, if set.
///
/// The TUI owns the terminal, so logs never go to stdout or stderr.
pub fn init_logging() -> EyreResult<()> {
    let Some(path) = std::env::var_os("BEZIER_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(log_targets())
        .init();
    Ok(())
}

pub struct BezierApp {
    config: BezierConfig,
}

impl BezierApp {
    pub fn new(config: BezierConfig) -> Self {
        Self { config }
    }

    /// Open the default output device and run until the UI quits
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        info!(sample_rate, channels, "opened output device");

        let config = self.config.with_sample_rate(sample_rate);
        let node = BezierNode::new(config).wrap_err("failed to build oscillator")?;

        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE);

        let mut voice = ControlledVoice::new(
            node,
            control_rx,
            RenderCtx::new(config.frequency, config.shape),
        );
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    voice.render(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // scope drops samples when the UI falls behind
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut app = UiApp::new(control_tx, scope_rx, config)?;
        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();
        result
    }
}
