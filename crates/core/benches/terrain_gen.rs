use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relief::{HeightField, Seed, TerrainConfig};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain-generation");
    group.sample_size(10);

    let config = TerrainConfig {
        seed: Seed::Int(42),
        width: 256,
        height: 256,
        ..Default::default()
    };
    group.bench_function("height field", |b| {
        b.iter(|| HeightField::from_config(black_box(config.clone())))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
