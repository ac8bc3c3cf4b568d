//! Block rendering surface for the oscillator.
//!
//! `RenderCtx` carries the per-block parameters explicitly, and `GraphNode`
//! is the trait a host loop drives. `BezierNode` adds pitch handling on top of
//! the raw oscillator.

/// Core trait and per-block context.
pub mod node;
/// Bezier oscillator node.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
pub use oscillator::BezierNode;
