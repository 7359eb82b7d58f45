//! Whole-session benchmarks.
//!
//! These run the benchmark runner over synthetic hosts to track the overhead
//! the runner and the sweep add around the plugin's own processing.

mod session;

pub use session::bench_session;
