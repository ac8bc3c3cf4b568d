use crate::{
    config::BezierConfig,
    dsp::oscillator::BezierOscillator,
    error::BezierError,
    graph::node::{GraphNode, RenderCtx},
};

/*
Bezier Oscillator Node
======================

A wavetable oscillator whose single cycle is drawn by a quadratic Bezier
curve. The shape control (0.0 - 1.0) slides the curve's control point
along x, which decides where the hump of each half cycle peaks:

    shape 0.0         shape 0.25        shape 1.0
    (peaks late)      (symmetric)       (peaks early)

          .              .-.             .
         / |            /   \           | \
      __/  |          _/     \_         |  \__

Only the positive half is drawn; the negative half mirrors it.

At 0.25 the control point sits midway along the curve, x moves at
constant speed and the hump is a plain parabola, close to a sine. Moving
it either way leans the hump and adds harmonics.

Pitch comes from the render context like any other oscillator. A fixed
frequency can be set for drones and test tones, and detune works in cents.

Example usage:
  let node = BezierNode::new(BezierConfig::default())?;          // follows ctx
  let drone = BezierNode::new(BezierConfig::default())?.with_frequency(55.0);
  let wide = BezierNode::new(BezierConfig::default())?.with_detune(12.0);
*/

pub struct BezierNode {
    osc: BezierOscillator,
    /// Fixed frequency (Hz). If Some, ignores ctx.frequency.
    base_frequency: Option<f32>,
    /// Detune in cents. 100 cents = 1 semitone.
    detune_cents: f32,
}

impl BezierNode {
    pub fn new(config: BezierConfig) -> Result<Self, BezierError> {
        Ok(Self {
            osc: BezierOscillator::new(config)?,
            base_frequency: None,
            detune_cents: 0.0,
        })
    }

    /// Set a fixed frequency, ignoring the pitch from RenderCtx.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self
    }

    /// Set detune in cents (100 cents = 1 semitone).
    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    pub fn oscillator(&self) -> &BezierOscillator {
        &self.osc
    }
}

impl GraphNode for BezierNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let base_freq = self.base_frequency.unwrap_or(ctx.frequency);

        // Apply detune: frequency * 2^(cents/1200)
        let final_freq = if self.detune_cents != 0.0 {
            base_freq * 2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            base_freq
        };

        let modified_ctx = RenderCtx {
            frequency: final_freq,
            ..*ctx
        };
        self.osc.render(out, &modified_ctx);
    }

    fn reset(&mut self) {
        self.osc.reset();
    }
}
