pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Block rendering context and node trait
pub mod synth; // Control messages from a UI thread

pub use config::BezierConfig;
pub use dsp::oscillator::BezierOscillator;
pub use error::BezierError;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Waveform table length used when none is configured.
pub const DEFAULT_RESOLUTION: usize = 1024;

/// Control point height. A quadratic curve peaks at half its control height,
/// so 2.0 gives a waveform that spans -1.0..=1.0.
pub const CONTROL_Y: f32 = 2.0;

/// Scale applied to the end point's X relative to the half-table width.
pub const END_X_SCALE: f32 = 0.5;
