//! sose benchmark
use benches::{Benchmarker, IV, KEY, criterion_group_bench};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use sose::{
    Sose,
    cipher::{KeyIvInit, StreamCipher},
};

const KB: usize = 1024;

fn bench(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("stream-cipher");

    for size in &[KB, 2 * KB, 4 * KB, 8 * KB, 16 * KB] {
        let mut buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("apply_keystream", size), |b| {
            let mut cipher = Sose::new(&KEY.into(), &IV.into());
            b.iter(|| cipher.apply_keystream(&mut buf));
        });

        group.bench_function(BenchmarkId::new("generate_keystream", size), |b| {
            let mut state = sose::initialize(&KEY[..16], &IV).unwrap();
            b.iter(|| sose::generate_keystream(&mut state, *size));
        });
    }

    group.finish();
}

fn bench_setup(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("stream-cipher-setup");

    group.bench_function("initialize", |b| {
        b.iter(|| sose::initialize(&KEY, &IV).unwrap());
    });

    group.finish();
}

criterion_group_bench!(benches_sose, bench);
criterion_group_bench!(benches_setup, bench_setup);
criterion_main!(benches_sose, benches_setup);
