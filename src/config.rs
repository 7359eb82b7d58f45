#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    bench::result::frame_latency,
    error::{BenchError, Result},
    worker::{channel::HEADER_LEN, DEFAULT_RING_SIZE},
};

/// Benchmark session settings.
///
/// ```
/// use lv2bm::BenchConfig;
///
/// let config = BenchConfig::new()
///     .sample_rate(48_000)
///     .frame_size(128)
///     .n_frames(32)
///     .full_test(true);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Samples per second.
    pub sample_rate: u32,
    /// Samples per processing call (the JACK period size).
    pub frame_size: u32,
    /// Timed processing calls per measurement.
    pub n_frames: u32,
    /// Also sweep the control parameter grid.
    pub full_test: bool,
    /// Sample count for axes without a natural count of their own.
    pub points_per_axis: u32,
    /// Bytes per Work Channel direction for hosts that run a worker.
    pub worker_ring_size: usize,
}

impl BenchConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: 44_100,
            frame_size: 256,
            n_frames: 64,
            full_test: false,
            points_per_axis: 4,
            worker_ring_size: DEFAULT_RING_SIZE,
        }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn frame_size(mut self, frame_size: u32) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn n_frames(mut self, n_frames: u32) -> Self {
        self.n_frames = n_frames;
        self
    }

    pub fn full_test(mut self, full_test: bool) -> Self {
        self.full_test = full_test;
        self
    }

    pub fn points_per_axis(mut self, points: u32) -> Self {
        self.points_per_axis = points;
        self
    }

    pub fn worker_ring_size(mut self, bytes: usize) -> Self {
        self.worker_ring_size = bytes;
        self
    }

    /// Seconds of audio one frame represents: the realtime deadline per call.
    pub fn frame_deadline(&self) -> f64 {
        frame_latency(self.frame_size, self.sample_rate)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(invalid("sample rate must be non-zero"));
        }
        if self.frame_size == 0 {
            return Err(invalid("frame size must be non-zero"));
        }
        if self.n_frames == 0 {
            return Err(invalid("frame count must be non-zero"));
        }
        if self.points_per_axis == 0 {
            return Err(invalid("points per axis must be at least 1"));
        }
        if self.worker_ring_size <= HEADER_LEN {
            return Err(invalid(format!(
                "worker ring size must exceed {HEADER_LEN} bytes"
            )));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(msg: impl Into<String>) -> BenchError {
    BenchError::InvalidConfig(msg.into())
}
