//! Low-level DSP primitives behind the Bezier oscillator.
//!
//! Everything here is allocation-free once constructed and safe to run on
//! the audio thread. The modules build on each other in order: points and
//! curves, the arc length table, equidistant resampling, mirroring into a
//! full cycle, and finally phase-accumulator playback.

/// Arc length lookup table for a sampled curve.
pub mod arc_length;
/// Quadratic Bezier evaluation.
pub mod curve;
/// Odd-symmetric mirroring of a half table.
pub mod mirror;
/// Table playback oscillator.
pub mod oscillator;
/// Phase accumulator and wrap policies.
pub mod phase;
/// 2D point and vector arithmetic.
pub mod point;
/// Inverse arc length lookup and equidistant sampling.
pub mod resample;
/// Table storage and the rebuild state machine.
pub mod wavetable;

pub use phase::PhaseWrap;
pub use point::Point2D;
pub use wavetable::TableState;
