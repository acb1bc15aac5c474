//! Index-generation benchmarks: the PRNG-driven hot loop behind every
//! `Gen`/`Rep` call.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use xlock_core::indexes;

fn bench_generate_without_replacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexes_generate_no_replacement");

    for &size in &[128usize, 512, 2048, 8192] {
        group.bench_with_input(BenchmarkId::new("size", size), &size, |b, &size| {
            let mut out = vec![0u32; size];
            b.iter(|| {
                let mut seed = 0x1234_5678u64;
                indexes::generate(&mut seed, size, &mut out, 0, size as u32 * 4, false).unwrap();
                criterion::black_box(&out);
            });
        });
    }
    group.finish();
}

fn bench_generate_with_replacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexes_generate_with_replacement");

    for &size in &[128usize, 512, 2048, 8192] {
        group.bench_with_input(BenchmarkId::new("size", size), &size, |b, &size| {
            let mut out = vec![0u32; size];
            b.iter(|| {
                let mut seed = 0x9abc_def0u64;
                indexes::generate(&mut seed, size, &mut out, 0, 16, true).unwrap();
                criterion::black_box(&out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_without_replacement, bench_generate_with_replacement);
criterion_main!(benches);
