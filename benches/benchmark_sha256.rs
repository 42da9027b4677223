use saltcore::hash::{Sha256, sha256};
use saltcore::mac::hmac_sha256;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_sha256(c: &mut Criterion) {
    c.bench_function("sha256 64 bytes", |b| {
        b.iter(|| sha256(black_box(&[0u8; 64])))
    });

    let mut group = c.benchmark_group("sha256 streaming");
    for len in [1024usize, 16 * 1024] {
        let data = vec![0x5au8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| {
                let mut ctx = Sha256::new();
                for chunk in data.chunks(100) {
                    ctx.update(black_box(chunk));
                }
                ctx.finalize()
            })
        });
    }
    group.finish();
}

pub fn bench_hmac(c: &mut Criterion) {
    c.bench_function("hmac-sha256 64 bytes", |b| {
        b.iter(|| hmac_sha256(black_box(b"key"), black_box(&[0u8; 64])))
    });
}

criterion_group!(benches, bench_sha256, bench_hmac);
criterion_main!(benches);
