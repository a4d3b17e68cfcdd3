//! Robust I/O benchmarks.
//!
//! Sources are in-memory scripted descriptors, so the numbers measure loop
//! and buffer overhead rather than kernel time.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use robio_core::scripted::ScriptedDescriptor;
use robio_core::{RioStream, readn, writen};

fn text(lines: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..lines {
        data.extend_from_slice(format!("{i:08} lorem ipsum dolor sit amet\n").as_bytes());
    }
    data
}

fn bench_readn_chunking(c: &mut Criterion) {
    let data = vec![0xABu8; 64 * 1024];
    let mut group = c.benchmark_group("readn");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for &chunk in &[1usize, 64, 4096, usize::MAX] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            let mut dst = vec![0u8; data.len()];
            b.iter(|| {
                let mut src = ScriptedDescriptor::from_bytes(&data).chunked(chunk);
                black_box(readn(&mut src, &mut dst).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_writen(c: &mut Criterion) {
    let data = vec![0x5Au8; 64 * 1024];
    let mut group = c.benchmark_group("writen");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("chunk_512_interrupted", |b| {
        b.iter(|| {
            let mut sink = ScriptedDescriptor::sink().chunked(512).interrupt_alternate();
            black_box(writen(&mut sink, &data).unwrap());
        });
    });
    group.finish();
}

fn bench_readlineb(c: &mut Criterion) {
    let data = text(2000);
    let mut group = c.benchmark_group("readlineb");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for &bufsize in &[16usize, 512, 8192] {
        group.bench_with_input(BenchmarkId::new("bufsize", bufsize), &bufsize, |b, &bufsize| {
            let mut line = [0u8; 128];
            b.iter(|| {
                let src = ScriptedDescriptor::from_bytes(&data);
                let mut stream = RioStream::with_capacity(src, bufsize).unwrap();
                let mut lines = 0usize;
                while stream.readlineb(&mut line).unwrap() > 0 {
                    lines += 1;
                }
                black_box(lines);
            });
        });
    }
    group.finish();
}

fn bench_readnb_small_records(c: &mut Criterion) {
    let data = vec![7u8; 64 * 1024];
    let mut group = c.benchmark_group("readnb");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("record_16", |b| {
        let mut rec = [0u8; 16];
        b.iter(|| {
            let mut stream = RioStream::new(ScriptedDescriptor::from_bytes(&data));
            while stream.readnb(&mut rec).unwrap() > 0 {
                black_box(&rec);
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_readn_chunking,
    bench_writen,
    bench_readlineb,
    bench_readnb_small_records
);
criterion_main!(benches);
