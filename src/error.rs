//! Errors raised while configuring or allocating an oscillator.
//!
//! Nothing in the per-sample or per-block path returns an error: bad block
//! parameters are sanitized there instead. Every variant below is either a
//! configuration mistake the caller has to fix or an allocation failure that
//! leaves no instance behind.

use std::collections::TryReserveError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BezierError {
    /// Waveform table length is odd or shorter than 4 samples.
    InvalidResolution { resolution: usize },
    /// Arc-length table needs at least one segment.
    InvalidCurveResolution { res: usize },
    /// Resampler needs at least the two fixed endpoints.
    InvalidSampleCount { how_many: usize },
    /// Sample rate is not a positive, finite number.
    InvalidSampleRate { sample_rate: f32 },
    /// Shape control is not finite or lies outside 0.0..=1.0.
    InvalidShape { shape: f32 },
    /// Frequency is not finite.
    InvalidFrequency { frequency: f32 },
    /// Control point height is not finite.
    InvalidControlHeight { control_y: f32 },
    /// A caller-supplied buffer has the wrong length.
    BufferSize { expected: usize, actual: usize },
    /// Working memory for a table could not be reserved.
    Allocation { len: usize, source: TryReserveError },
}

impl fmt::Display for BezierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { resolution } => write!(
                f,
                "table resolution must be even and at least 4, got {resolution}"
            ),
            Self::InvalidCurveResolution { res } => {
                write!(f, "curve resolution must be at least 1, got {res}")
            }
            Self::InvalidSampleCount { how_many } => write!(
                f,
                "equidistant resampling needs at least 2 samples, got {how_many}"
            ),
            Self::InvalidSampleRate { sample_rate } => {
                write!(f, "sample rate must be positive and finite, got {sample_rate}")
            }
            Self::InvalidShape { shape } => {
                write!(f, "shape must be within 0.0..=1.0, got {shape}")
            }
            Self::InvalidFrequency { frequency } => {
                write!(f, "frequency must be finite, got {frequency}")
            }
            Self::InvalidControlHeight { control_y } => {
                write!(f, "control point height must be finite, got {control_y}")
            }
            Self::BufferSize { expected, actual } => {
                write!(f, "buffer holds {actual} samples, expected {expected}")
            }
            Self::Allocation { len, source } => {
                write!(f, "failed to allocate table of {len} samples: {source}")
            }
        }
    }
}

impl std::error::Error for BezierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Allocate a zeroed `f32` table, reporting failure instead of aborting.
pub(crate) fn try_alloc_table(len: usize) -> Result<Vec<f32>, BezierError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|source| BezierError::Allocation { len, source })?;
    table.resize(len, 0.0);
    Ok(table)
}
