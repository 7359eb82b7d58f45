//! Benchmarks for the realtime-safe work handoff.

mod channel;
mod handoff;

pub use channel::bench_channel;
pub use handoff::bench_handoff;
