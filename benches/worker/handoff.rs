//! Benchmarks for scheduling work and collecting responses.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lv2bm::{Responder, Worker};

use crate::PAYLOAD_SIZES;

pub fn bench_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker/handoff");

    for &size in PAYLOAD_SIZES {
        let payload = vec![0x11u8; size];

        // Processing-thread cost of a schedule followed by a drain. The worker
        // answers asynchronously, so drains pick up whatever has arrived.
        let mut worker = Worker::spawn(
            |request: &[u8], responder: &mut Responder| {
                let _ = responder.respond(request);
            },
            1 << 16,
        )
        .unwrap();
        let mut received = 0usize;

        group.bench_with_input(BenchmarkId::new("schedule_and_drain", size), &size, |b, _| {
            b.iter(|| {
                let _ = worker.schedule(black_box(&payload));
                worker.emit_responses(&mut |response: &[u8]| {
                    received += black_box(response).len();
                });
            })
        });

        black_box(received);
    }

    group.finish();
}
