use tracing::info;

use crate::{
    config::BezierConfig,
    dsp::{
        phase::PhaseAccumulator,
        wavetable::BezierTable,
    },
    error::BezierError,
    graph::node::RenderCtx,
};

/// Bezier wavetable oscillator: a rebuildable table read by a phase accumulator.
///
/// All memory is allocated in [`BezierOscillator::new`]. After that, rendering
/// never allocates, never blocks and never fails.
pub struct BezierOscillator {
    table: BezierTable,
    phase: PhaseAccumulator,
    frequency: f32,
    sample_rate: f32,
}

impl BezierOscillator {
    pub fn new(config: BezierConfig) -> Result<Self, BezierError> {
        config.validate()?;

        let table = BezierTable::new(config.resolution, config.shape, config.control_y)?;
        let phase = PhaseAccumulator::new(config.resolution, config.sample_rate, config.wrap);

        info!(
            resolution = config.resolution,
            sample_rate = config.sample_rate,
            shape = config.shape,
            wrap = ?config.wrap,
            "bezier oscillator ready"
        );

        Ok(Self {
            table,
            phase,
            frequency: config.frequency,
            sample_rate: config.sample_rate,
        })
    }

    /// Apply a block's parameters. Returns true if the table was rebuilt.
    ///
    /// Frequency takes effect on the next sample; only a shape change can
    /// rebuild the table.
    pub fn begin_block(&mut self, ctx: &RenderCtx) -> bool {
        self.set_frequency(ctx.frequency);
        self.table.retabulate(ctx.shape)
    }

    /// Render one block: apply `ctx`, then fill `out`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.begin_block(ctx);
        self.phase.render(self.table.table(), self.frequency, out);
    }

    /// One sample at the current frequency and table.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let increment = self.phase.increment(self.frequency);
        self.phase.next_sample(self.table.table(), increment)
    }

    /// Non-finite frequencies are ignored.
    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_finite() {
            self.frequency = frequency;
        }
    }

    /// Return the phase to the start of the cycle. Tables are untouched.
    pub fn reset(&mut self) {
        self.phase.reset();
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn shape(&self) -> f32 {
        self.table.shape()
    }

    pub fn phase(&self) -> f32 {
        self.phase.phase()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn table(&self) -> &[f32] {
        self.table.table()
    }

    pub fn wavetable(&self) -> &BezierTable {
        &self.table
    }
}
