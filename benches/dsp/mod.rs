//! Benchmarks for low-level DSP primitives.

mod oscillator;
mod table;

pub use oscillator::bench_oscillator;
pub use table::bench_table;
