//! Benchmarks for insertion throughput and dimensionality

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use vdb::{DistanceMetric, VectorStore};

fn random_vectors(n: usize, dim: usize) -> Vec<Vec<f32>> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [100, 1000, 10000].iter() {
        let vectors = random_vectors(*count, 128);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let store = VectorStore::create(128, DistanceMetric::Cosine).unwrap();
                for v in &vectors {
                    store.add(black_box(v), None, None).unwrap();
                }
                store
            });
        });
    }

    group.finish();
}

fn benchmark_dimensionality(c: &mut Criterion) {
    let mut group = c.benchmark_group("dimensionality");

    for dims in [32, 128, 512, 1536].iter() {
        let store = VectorStore::create(*dims, DistanceMetric::Cosine).unwrap();
        for v in random_vectors(1000, *dims) {
            store.add(&v, None, None).unwrap();
        }
        let query = random_vectors(1, *dims).remove(0);

        group.bench_with_input(BenchmarkId::from_parameter(dims), dims, |b, _| {
            b.iter(|| store.search(black_box(&query), black_box(10)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_dimensionality);
criterion_main!(benches);
