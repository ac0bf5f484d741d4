//! Frame compression and decompression throughput across levels and
//! input shapes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use zyphrax::{compress, compress_bound, compress_to_vec, decompress, CompressionParams};

const INPUT_LEN: usize = 1 << 20;

/// Structured text-like input with plenty of repeated phrases.
fn repetitive_input() -> Vec<u8> {
    b"GET /api/v1/resource HTTP/1.1\r\nHost: bench.example\r\nAccept: */*\r\n\r\n"
        .iter()
        .copied()
        .cycle()
        .take(INPUT_LEN)
        .collect()
}

/// Pseudo-random bytes via a fixed LCG: incompressible, reproducible.
fn noise_input() -> Vec<u8> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..INPUT_LEN)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (state >> 56) as u8
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let inputs = [("repetitive", repetitive_input()), ("noise", noise_input())];
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(INPUT_LEN as u64));

    for (name, src) in &inputs {
        for level in [1, 3, 9] {
            let params = CompressionParams {
                level,
                ..CompressionParams::default()
            };
            let mut dst = vec![0u8; compress_bound(src.len())];
            group.bench_with_input(
                BenchmarkId::new(*name, level),
                &params,
                |b, params| b.iter(|| compress(src, &mut dst, params).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let inputs = [("repetitive", repetitive_input()), ("noise", noise_input())];
    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(INPUT_LEN as u64));

    for (name, src) in &inputs {
        for level in [1, 3, 9] {
            let params = CompressionParams {
                level,
                ..CompressionParams::default()
            };
            let frame = compress_to_vec(src, &params).unwrap();
            let mut out = vec![0u8; src.len()];
            group.bench_with_input(
                BenchmarkId::new(*name, level),
                &frame,
                |b, frame| b.iter(|| decompress(frame, &mut out).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
