use crate::{
    graph::node::{GraphNode, RenderCtx},
    synth::message::{ControlMessage, MessageReceiver},
    MAX_BLOCK_SIZE,
};

/// A node played from the audio thread while another thread steers it
///
/// Pending messages are applied at the top of every `render` call, then the
/// node renders with the resulting context. No locks, no allocation.
pub struct ControlledVoice<N: GraphNode, R: MessageReceiver> {
    node: N,
    rx: R,
    ctx: RenderCtx,
}

impl<N: GraphNode, R: MessageReceiver> ControlledVoice<N, R> {
    pub fn new(node: N, rx: R, ctx: RenderCtx) -> Self {
        Self { node, rx, ctx }
    }

    /// Parameters the next block will render with
    pub fn ctx(&self) -> RenderCtx {
        self.ctx
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn render(&mut self, out: &mut [f32]) {
        self.poll_messages();

        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.node.render_block(block, &self.ctx);
        }
    }

    fn poll_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                ControlMessage::SetFrequency(frequency) => self.ctx.frequency = frequency,
                ControlMessage::SetNote(note) => {
                    self.ctx.frequency = RenderCtx::from_note(note, self.ctx.shape).frequency;
                }
                ControlMessage::SetShape(shape) => self.ctx.shape = shape,
                ControlMessage::Reset => self.node.reset(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{config::BezierConfig, graph::oscillator::BezierNode};

    impl MessageReceiver for VecDeque<ControlMessage> {
        fn pop(&mut self) -> Option<ControlMessage> {
            self.pop_front()
        }
    }

    fn node() -> BezierNode {
        BezierNode::new(BezierConfig::default().with_resolution(256)).unwrap()
    }

    #[test]
    fn messages_update_context_before_rendering() {
        let rx = VecDeque::from(vec![
            ControlMessage::SetFrequency(330.0),
            ControlMessage::SetShape(0.8),
        ]);
        let mut voice = ControlledVoice::new(node(), rx, RenderCtx::new(220.0, 0.5));

        let mut out = vec![0.0f32; 64];
        voice.render(&mut out);

        assert_eq!(voice.ctx(), RenderCtx::new(330.0, 0.8));
        assert_eq!(voice.node().oscillator().shape(), 0.8);
        assert_eq!(voice.node().oscillator().frequency(), 330.0);
    }

    #[test]
    fn note_sets_frequency() {
        let rx = VecDeque::from(vec![ControlMessage::SetNote(69)]);
        let mut voice = ControlledVoice::new(node(), rx, RenderCtx::new(220.0, 0.5));
        voice.render(&mut [0.0f32; 16]);
        assert!((voice.ctx().frequency - 440.0).abs() < 1e-3);
    }

    #[test]
    fn reset_restarts_the_cycle() {
        let rx = VecDeque::new();
        let mut voice = ControlledVoice::new(node(), rx, RenderCtx::new(440.0, 0.5));
        voice.render(&mut [0.0f32; 100]);
        assert!(voice.node().oscillator().phase() != 0.0);

        voice.rx.push_back(ControlMessage::Reset);
        voice.render(&mut []);
        assert_eq!(voice.node().oscillator().phase(), 0.0);
    }

    #[test]
    fn renders_longer_than_one_block() {
        let mut voice =
            ControlledVoice::new(node(), VecDeque::new(), RenderCtx::new(440.0, 0.5));
        let mut out = vec![0.0f32; MAX_BLOCK_SIZE * 2 + 17];
        voice.render(&mut out);
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn drains_a_ring_buffer() {
        let (mut tx, rx) = rtrb::RingBuffer::new(8);
        let mut voice = ControlledVoice::new(node(), rx, RenderCtx::new(220.0, 0.5));

        tx.push(ControlMessage::SetShape(0.1)).unwrap();
        voice.render(&mut [0.0f32; 32]);
        assert_eq!(voice.node().oscillator().shape(), 0.1);
    }
}
