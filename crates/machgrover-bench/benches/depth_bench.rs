//! Construction and lowering time of the benchmarked circuits.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use machgrover::{build_diffuser, build_grover_circuit, create_mock_oracle, decompose};
use machgrover_bench::random_key;

fn bench_diffuser(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffuser");
    for n in [4u32, 6, 8, 10] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter(|| build_diffuser(black_box(n)).unwrap());
        });
        let diffuser = build_diffuser(n).unwrap();
        group.bench_with_input(BenchmarkId::new("decompose", n), &diffuser, |b, d| {
            b.iter(|| decompose(black_box(d), 1).unwrap());
        });
    }
    group.finish();
}

fn bench_grover(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut group = c.benchmark_group("grover");
    for n in [4u32, 6, 8] {
        let key = random_key(n as usize, &mut rng);
        let oracle = create_mock_oracle(n, 2, &key).unwrap();
        group.bench_with_input(BenchmarkId::new("build", n), &oracle, |b, oracle| {
            b.iter(|| build_grover_circuit(black_box(n), 1, oracle).unwrap());
        });
        let grover = build_grover_circuit(n, 1, &oracle).unwrap();
        group.bench_with_input(BenchmarkId::new("decompose", n), &grover, |b, g| {
            b.iter(|| decompose(black_box(g), 2).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diffuser, bench_grover);
criterion_main!(benches);
