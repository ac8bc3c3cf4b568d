#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Parameter changes sent to the audio thread
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetFrequency(f32),
    SetNote(u8),
    SetShape(f32),
    /// Restart the waveform cycle
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}
