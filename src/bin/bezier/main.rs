//! bezier - play and reshape the Bezier oscillator from a terminal
//!
//! Run with: cargo run --bin bezier
//! Set BEZIER_LOG=<path> to write library logs to a file.

mod app;
mod ui;

use app::BezierApp;
use bezier_dsp::BezierConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::init_logging()?;

    BezierApp::new(BezierConfig::default().with_frequency(110.0).with_shape(0.25)).run()
}
