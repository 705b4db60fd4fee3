use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feistel_shuffle::{
    feistel_deshuffle_optimized, feistel_shuffle, feistel_shuffle_optimized, shuffle_list, Seed,
    U256,
};

const ROUNDS: u8 = 4;

fn seed() -> Seed {
    Seed::repeat_byte(0x42)
}

fn shuffles(c: &mut Criterion) {
    let mut group = c.benchmark_group("feistel_shuffle");

    // 311^2 + 1, just past a perfect square, is the worst case for cycle walking.
    for domain in [100u64, 96_722, 1 << 32] {
        let domain = U256::from(domain);
        let x = domain / 3;

        group.bench_with_input(BenchmarkId::new("reference", domain), &domain, |b, d| {
            b.iter(|| feistel_shuffle(black_box(x), *d, seed(), ROUNDS))
        });
        group.bench_with_input(BenchmarkId::new("optimized", domain), &domain, |b, d| {
            b.iter(|| feistel_shuffle_optimized(black_box(x), *d, seed(), ROUNDS))
        });
        group.bench_with_input(BenchmarkId::new("deshuffle", domain), &domain, |b, d| {
            b.iter(|| feistel_deshuffle_optimized(black_box(x), *d, seed(), ROUNDS))
        });
    }

    group.finish();
}

fn whole_list(c: &mut Criterion) {
    c.bench_function("feistel_shuffle_list/4096", |b| {
        b.iter(|| shuffle_list(black_box(U256::from(4096)), seed(), ROUNDS))
    });
}

criterion_group!(benches, shuffles, whole_list);
criterion_main!(benches);
