use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use range_cache::harness::run_workload;
use range_cache::workload::WorkloadConfig;
use range_cache::{
    BaselineEngine, CachedQueryEngine, Operation, QueryEngine, Store, WorkloadGenerator,
};

fn workload(q: usize) -> (Store, Vec<Operation>) {
    let config = WorkloadConfig {
        n: 10_000,
        q,
        ..WorkloadConfig::default()
    };
    let mut generator = WorkloadGenerator::new(config, 42).unwrap();
    let store = Store::new(generator.initial_values()).unwrap();
    (store, generator.operations())
}

fn bench_mixed_workload(c: &mut Criterion) {
    let (store, ops) = workload(2_000);

    let mut group = c.benchmark_group("mixed_workload");
    group.sample_size(20);
    group.throughput(Throughput::Elements(ops.len() as u64));

    group.bench_function("baseline", |b| {
        b.iter_batched(
            || BaselineEngine::new(store.clone()),
            |mut engine| black_box(run_workload(&mut engine, &ops).unwrap()),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("cached_k1000", |b| {
        b.iter_batched(
            || CachedQueryEngine::new(store.clone(), 1000).unwrap(),
            |mut engine| black_box(run_workload(&mut engine, &ops).unwrap()),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_invalidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("invalidation");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("update_full_cache_k1000", |b| {
        let store = Store::new(vec![1; 10_000]).unwrap();
        let mut engine = CachedQueryEngine::new(store, 1000).unwrap();
        let mut counter = 0usize;

        b.iter(|| {
            // Refill one covering range so every update has work to do
            let left = counter % 5_000;
            black_box(engine.range_sum(left, left + 4_999).unwrap());
            engine.update(5_000, counter as i64).unwrap();
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_mixed_workload, bench_invalidation);
criterion_main!(benches);
