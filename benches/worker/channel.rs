//! Benchmarks for Work Channel framing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lv2bm::worker::channel::channel;

use crate::PAYLOAD_SIZES;

pub fn bench_channel(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker/channel");

    for &size in PAYLOAD_SIZES {
        let payload = vec![0x5Au8; size];
        let (mut tx, mut rx) = channel(4096);
        let mut buf = Vec::with_capacity(4096);

        // One frame in, one frame out; the ring position keeps moving so
        // frames regularly straddle the wrap point
        group.bench_with_input(BenchmarkId::new("write_read_frame", size), &size, |b, _| {
            b.iter(|| {
                tx.write_frame(black_box(&payload)).unwrap();
                black_box(rx.read_frame(&mut buf));
            })
        });

        // Completeness check alone, as done once per processing cycle
        let (mut tx, mut rx) = channel(4096);
        tx.write_frame(&payload).unwrap();
        group.bench_with_input(BenchmarkId::new("pending_frame_len", size), &size, |b, _| {
            b.iter(|| black_box(rx.pending_frame_len()))
        });
    }

    group.finish();
}
