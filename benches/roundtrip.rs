//! Encode / decode throughput for field lists, containers and raw copies.
//!
//! Buffers are allocated once per benchmark and reused; the top-level trim
//! keeps them at the encoded length, so later iterations never reallocate.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fieldcast::{
    Blit, Immutable, IntoBytes, KnownLayout, Serializable, ZcFromBytes, deserialize,
    deserialize_struct, serialize, serialize_struct,
};
use std::hint::black_box;

#[derive(Serializable, Default, Clone)]
struct Record {
    id: u64,
    name: String,
    scores: Vec<f32>,
    parent: Option<Box<u32>>,
}

#[derive(ZcFromBytes, IntoBytes, Immutable, KnownLayout, Default, Clone, Copy)]
#[repr(C)]
struct Sample {
    t: u64,
    value: f64,
}

fn record(len: usize) -> Record {
    Record {
        id: 7,
        name: "bench".into(),
        scores: (0..len).map(|i| i as f32).collect(),
        parent: Some(Box::new(1)),
    }
}

/// Attribute-list encode and decode with growing payloads.
fn attribute_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("attribute_list");

    for len in [0usize, 64, 4096] {
        let mut src = record(len);
        let mut buf = Vec::new();
        let size = serialize(&mut buf, 0, &mut [&mut src.attributes()]).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("serialize", len), &len, |b, _| {
            b.iter(|| serialize(&mut buf, 0, &mut [&mut src.attributes()]).unwrap());
        });

        let encoded = buf.clone();
        let mut dst = Record::default();
        group.bench_with_input(BenchmarkId::new("deserialize", len), &len, |b, _| {
            b.iter(|| deserialize(black_box(&encoded), 0, &mut [&mut dst.attributes()]).unwrap());
        });
    }
    group.finish();
}

/// Native element-wise encoding against the raw-copy wrapper.
fn native_vs_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("native_vs_blit");
    let count = 1024usize;

    let mut native: Vec<(u64, f64)> = (0..count as u64).map(|i| (i, i as f64)).collect();
    let mut blit: Vec<Blit<Sample>> = (0..count as u64)
        .map(|i| Blit(Sample { t: i, value: i as f64 }))
        .collect();
    group.throughput(Throughput::Elements(count as u64));

    let mut buf = Vec::new();
    group.bench_function("native", |b| {
        b.iter(|| serialize(&mut buf, 0, &mut [&mut native]).unwrap());
    });
    group.bench_function("blit", |b| {
        b.iter(|| serialize(&mut buf, 0, &mut [&mut blit]).unwrap());
    });

    let sample = Sample { t: 1, value: 2.0 };
    let mut raw = [0u8; 16];
    group.bench_function("struct", |b| {
        b.iter(|| {
            serialize_struct(&mut raw, 0, black_box(&sample)).unwrap();
            let mut back = Sample::default();
            deserialize_struct(&raw, 0, &mut back).unwrap();
            back
        });
    });
    group.finish();
}

criterion_group!(benches, attribute_list, native_vs_blit);
criterion_main!(benches);
