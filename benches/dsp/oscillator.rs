//! Benchmarks for block rendering.

use std::hint::black_box;

use bezier_dsp::{graph::RenderCtx, BezierConfig, BezierOscillator};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Steady shape - table lookups only
        let mut osc = BezierOscillator::new(BezierConfig::default()).unwrap();
        let ctx = RenderCtx::new(440.0, 0.5);
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Shape moves every block - worst case, rebuild per block
        let mut osc = BezierOscillator::new(BezierConfig::default()).unwrap();
        let shapes = [RenderCtx::new(440.0, 0.3), RenderCtx::new(440.0, 0.7)];
        let mut flip = 0;
        group.bench_with_input(BenchmarkId::new("sweeping", size), &size, |b, _| {
            b.iter(|| {
                flip ^= 1;
                osc.render(black_box(&mut buffer), black_box(&shapes[flip]));
            })
        });
    }

    group.finish();
}
