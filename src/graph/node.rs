/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Per-block parameters handed to every render call
///
/// Replaces reading host state from ambient globals: whatever drives the
/// oscillator builds one of these for each block.
/// - frequency: Pitch to render (Hz)
/// - shape: Curve shape control (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCtx {
    pub frequency: f32,
    pub shape: f32,
}

impl RenderCtx {
    pub fn new(frequency: f32, shape: f32) -> Self {
        Self { frequency, shape }
    }

    /// Create context from MIDI note (keyboard/sequencer use case)
    pub fn from_note(note: u8, shape: f32) -> Self {
        Self {
            frequency: midi_note_to_freq(note),
            shape,
        }
    }
}

/// Core trait for block-rendering audio nodes
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Return to the start of the waveform cycle
    ///
    /// Default implementation does nothing (stateless nodes).
    fn reset(&mut self) {
        // Default: do nothing
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
