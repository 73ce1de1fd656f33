use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mm_matrix::dense::RowMajorMatrix;
use mm_mul::{MulConfig, multiply};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn dense_multiply(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let threads = std::thread::available_parallelism().map_or(4, usize::from);
    let configs = [
        ("standard", MulConfig::default()),
        ("cache_blocked", MulConfig::default().with_cache_optimization(true)),
        ("vectorized", MulConfig::default().with_simd(true)),
        ("standard_mt", MulConfig::default().with_threads(threads)),
        (
            "cache_blocked_mt",
            MulConfig::default()
                .with_cache_optimization(true)
                .with_threads(threads),
        ),
        (
            "vectorized_mt",
            MulConfig::default().with_simd(true).with_threads(threads),
        ),
    ];

    let mut group = c.benchmark_group("dense_multiply");
    group.sample_size(10);
    for n in [64, 256, 512] {
        let a = RowMajorMatrix::<i32>::rand(&mut rng, n, n);
        let b = RowMajorMatrix::<i32>::rand(&mut rng, n, n);
        group.throughput(Throughput::Elements((n * n * n) as u64));
        for (name, config) in &configs {
            group.bench_with_input(BenchmarkId::new(*name, n), &n, |bench, _| {
                bench.iter(|| multiply(&a, &b, config).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, dense_multiply);
criterion_main!(benches);
