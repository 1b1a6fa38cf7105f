#[macro_use]
extern crate criterion;

use criterion::Criterion;

use minnesvakt_core::text::TextOps;
use minnesvakt_core::MemoryRegistry;

fn bench_allocate_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_allocate_release");

    for size in [16, 256, 4096] {
        group.throughput(criterion::Throughput::Bytes(size as u64));
        group.bench_function(format!("size_{}", size), |b| {
            let mut registry = MemoryRegistry::new(64);
            b.iter(|| {
                let handle = registry.allocate(size).unwrap();
                registry.release(Some(handle)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_scoped_release(c: &mut Criterion) {
    c.bench_function("registry_scoped_release_32_slots", |b| {
        let mut registry = MemoryRegistry::new(64);
        b.iter(|| {
            registry.push_context().unwrap();
            for _ in 0..32 {
                registry.allocate(64).unwrap();
            }
            registry.pop_context().unwrap();
        });
    });
}

fn bench_concat_growth(c: &mut Criterion) {
    c.bench_function("string_concat_16_rounds", |b| {
        let mut registry = MemoryRegistry::new(8);
        b.iter(|| {
            let mut handle = registry.new_string("seed").unwrap();
            for _ in 0..16 {
                handle = registry.concat_string(" more", Some(handle)).unwrap();
            }
            registry.release(Some(handle)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_release,
    bench_scoped_release,
    bench_concat_growth
);
criterion_main!(benches);
