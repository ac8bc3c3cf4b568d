use tracing::{debug, warn};

use crate::{
    dsp::{
        arc_length::ArcLengthTable, curve::QuadraticBezier, mirror::mirror_in_place,
        resample::EquidistantResampler,
    },
    error::{try_alloc_table, BezierError},
};

/*
Bezier Wavetable
================

One cycle of the waveform is built in three passes, all writing into
buffers allocated once at construction:

  1. arc_length.rs   measure the curve hump        -> lengths[half + 1]
  2. resample.rs     sample it at equal arc length  -> table[0..half]
  3. mirror.rs       negate and reflect             -> table[half..len]

Rebuilding is driven by the shape control and nothing else. Frequency only
changes how fast the table is read, so it never reaches this module.


Retabulation State Machine
--------------------------

    ┌────────┐  shape differs from cached   ┌────────────┐
    │ Stable │ ───────────────────────────→ │ Rebuilding │
    └────────┘                              └────────────┘
         ↑                                        │
         └──────── tables rewritten, cache = new ─┘

Each block the controller compares the incoming shape against the cached
one. Equal values stay Stable and cost one comparison. A different value
passes through Rebuilding, where all three passes run in place, and comes
back to Stable before the block renders. The rebuild is deterministic:
the same shape always produces bit-identical tables.

There is no crossfade. Swapping tables under a running phase can click
unless the new table happens to match the old one at the read position.
*/

/// Where the table is in its rebuild cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableState {
    Stable,
    Rebuilding { from: f32, to: f32 },
}

/// Decides, once per block, whether the table needs rebuilding.
#[derive(Debug, Clone)]
pub struct RetabulationController {
    shape: f32,
    state: TableState,
}

impl RetabulationController {
    pub fn new(shape: f32) -> Self {
        Self {
            shape,
            state: TableState::Stable,
        }
    }

    /// Cached shape the current table was built from.
    pub fn shape(&self) -> f32 {
        self.shape
    }

    /// `Rebuilding` is only visible between `poll` and `finish`.
    pub fn state(&self) -> TableState {
        self.state
    }

    /// Compare an incoming shape against the cache and move to the next state.
    ///
    /// Out-of-range values are clamped to 0.0..=1.0. NaN is ignored and
    /// keeps the current table.
    pub fn poll(&mut self, shape: f32) -> TableState {
        if shape.is_nan() {
            warn!("ignoring NaN shape, keeping {}", self.shape);
            self.state = TableState::Stable;
            return self.state;
        }

        let shape = shape.clamp(0.0, 1.0);
        self.state = if shape == self.shape {
            TableState::Stable
        } else {
            TableState::Rebuilding {
                from: self.shape,
                to: shape,
            }
        };
        self.state
    }

    /// Commit a pending rebuild: cache the new shape and settle.
    pub fn finish(&mut self) {
        if let TableState::Rebuilding { to, .. } = self.state {
            self.shape = to;
        }
        self.state = TableState::Stable;
    }
}

/// Arc-length and waveform tables for one oscillator, rebuilt in place.
pub struct BezierTable {
    arc: ArcLengthTable,
    resampler: EquidistantResampler,
    table: Vec<f32>,
    curve: QuadraticBezier,
    control_y: f32,
    controller: RetabulationController,
}

impl BezierTable {
    /// Allocate both tables and build them for `shape`.
    ///
    /// `resolution` must be even and at least 4. Any allocation failure
    /// returns before a table is built.
    pub fn new(resolution: usize, shape: f32, control_y: f32) -> Result<Self, BezierError> {
        if resolution < 4 || resolution % 2 != 0 {
            return Err(BezierError::InvalidResolution { resolution });
        }
        if !(0.0..=1.0).contains(&shape) {
            return Err(BezierError::InvalidShape { shape });
        }
        if !control_y.is_finite() {
            return Err(BezierError::InvalidControlHeight { control_y });
        }

        let half = resolution / 2;
        let mut wavetable = Self {
            arc: ArcLengthTable::new(half)?,
            resampler: EquidistantResampler::new(half)?,
            table: try_alloc_table(resolution)?,
            curve: QuadraticBezier::waveform(half, shape, control_y),
            control_y,
            controller: RetabulationController::new(shape),
        };
        wavetable.rebuild();
        Ok(wavetable)
    }

    /// Per-block entry point. Returns true when the tables were rebuilt.
    pub fn retabulate(&mut self, shape: f32) -> bool {
        match self.controller.poll(shape) {
            TableState::Stable => false,
            TableState::Rebuilding { from, to } => {
                self.controller.finish();
                self.rebuild();
                debug!(
                    from,
                    to,
                    length = self.arc.total_length(),
                    "rebuilt bezier table"
                );
                true
            }
        }
    }

    /// Run all three passes for the cached shape, unconditionally.
    pub fn rebuild(&mut self) {
        let half = self.half();
        self.curve = QuadraticBezier::waveform(half, self.controller.shape(), self.control_y);
        self.arc.build(&self.curve);
        self.resampler
            .resample_into(&self.curve, &self.arc, &mut self.table[..half]);
        mirror_in_place(&mut self.table);
    }

    /// One full waveform cycle.
    pub fn table(&self) -> &[f32] {
        &self.table
    }

    pub fn arc_lengths(&self) -> &[f32] {
        self.arc.lengths()
    }

    pub fn total_length(&self) -> f32 {
        self.arc.total_length()
    }

    pub fn curve(&self) -> &QuadraticBezier {
        &self.curve
    }

    pub fn shape(&self) -> f32 {
        self.controller.shape()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn half(&self) -> usize {
        self.table.len() / 2
    }
}
