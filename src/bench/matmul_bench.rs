use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tiled_matmul::harness::make_operands;
use tiled_matmul::{Dims, TileShape, matmul_reference, matmul_tiled};

const SHAPES: &[(&str, Dims)] = &[
    ("128x64x128", Dims { m: 128, k: 64, n: 128 }),
    ("256x128x256", Dims { m: 256, k: 128, n: 256 }),
];

const TILE_SIZES: &[usize] = &[8, 16, 32, 64];

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    for &(label, dims) in SHAPES {
        group.throughput(Throughput::Elements((dims.m * dims.k * dims.n) as u64));
        let (a, b) = make_operands(dims, 123);

        group.bench_function(BenchmarkId::new("reference", label), |bench| {
            bench.iter(|| matmul_reference(black_box(&a), black_box(&b)));
        });

        for &tile in TILE_SIZES {
            let id = BenchmarkId::new(format!("tiled_{tile}"), label);
            group.bench_function(id, |bench| {
                bench.iter(|| matmul_tiled(black_box(&a), black_box(&b), TileShape::cubic(tile)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_matmul);
criterion_main!(benches);
