#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::phase::PhaseWrap, error::BezierError, CONTROL_Y, DEFAULT_RESOLUTION};

/// Construction-time settings for a [`BezierOscillator`](crate::BezierOscillator).
///
/// Sample rate and resolution are fixed for the lifetime of an instance.
/// Frequency and shape are only starting values: every processing block
/// brings its own through [`RenderCtx`](crate::graph::RenderCtx).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierConfig {
    /// Waveform table length (even, at least 4).
    pub resolution: usize,
    pub sample_rate: f32,
    /// Initial frequency in Hz.
    pub frequency: f32,
    /// Initial shape control, 0.0..=1.0.
    pub shape: f32,
    /// Height of the curve's control point.
    pub control_y: f32,
    pub wrap: PhaseWrap,
}

impl Default for BezierConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            sample_rate: 48_000.0,
            frequency: 220.0,
            shape: 0.5,
            control_y: CONTROL_Y,
            wrap: PhaseWrap::ExtraStep,
        }
    }
}

impl BezierConfig {
    pub fn new(frequency: f32, shape: f32, sample_rate: f32) -> Self {
        Self {
            frequency,
            shape,
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_shape(mut self, shape: f32) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_control_y(mut self, control_y: f32) -> Self {
        self.control_y = control_y;
        self
    }

    pub fn with_wrap(mut self, wrap: PhaseWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Number of samples in the curve half of the table.
    pub fn half_resolution(&self) -> usize {
        self.resolution / 2
    }

    /// Reject settings that would otherwise push NaN or Inf into the tables.
    pub fn validate(&self) -> Result<(), BezierError> {
        if self.resolution < 4 || self.resolution % 2 != 0 {
            return Err(BezierError::InvalidResolution {
                resolution: self.resolution,
            });
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(BezierError::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }
        if !self.frequency.is_finite() {
            return Err(BezierError::InvalidFrequency {
                frequency: self.frequency,
            });
        }
        if !(0.0..=1.0).contains(&self.shape) {
            // NaN fails `contains` too
            return Err(BezierError::InvalidShape { shape: self.shape });
        }
        if !self.control_y.is_finite() {
            return Err(BezierError::InvalidControlHeight {
                control_y: self.control_y,
            });
        }
        Ok(())
    }
}
