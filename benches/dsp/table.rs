//! Benchmarks for table construction.

use std::hint::black_box;

use bezier_dsp::dsp::wavetable::BezierTable;
use criterion::{BenchmarkId, Criterion};

pub fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/table");

    for resolution in [256, 1024, 4096] {
        let mut table = BezierTable::new(resolution, 0.5, 2.0).unwrap();
        group.bench_with_input(
            BenchmarkId::new("rebuild", resolution),
            &resolution,
            |b, _| {
                b.iter(|| {
                    table.rebuild();
                    black_box(table.table());
                })
            },
        );
    }

    group.finish();
}
