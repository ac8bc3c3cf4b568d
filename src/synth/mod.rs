// Purpose: drive a node from another thread
// Control messages are drained once per block, so parameters only ever
// change on block boundaries

pub mod message;
pub mod voice;

pub use message::{ControlMessage, MessageReceiver};
pub use voice::ControlledVoice;
