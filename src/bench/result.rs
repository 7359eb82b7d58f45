#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing of one measurement.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchResult {
    /// Seconds spent in all timed processing calls.
    pub total: f64,
    /// Seconds per processing call.
    pub average: f64,
    /// Percentage of the realtime deadline used, doubled (see [`jack_load`]).
    pub load: f64,
}

impl BenchResult {
    /// Reduce `total` seconds over `n_frames` calls of `frame_size` samples.
    pub fn from_total(total: f64, n_frames: u32, frame_size: u32, sample_rate: u32) -> Self {
        let average = total / n_frames as f64;
        Self {
            total,
            average,
            load: jack_load(average, frame_size, sample_rate),
        }
    }
}

/// Load as JACK reports it: time per frame as a percentage of the frame's
/// deadline, times two.
///
/// The factor of two leaves half the period to the rest of the audio graph.
#[inline]
pub fn jack_load(average: f64, frame_size: u32, sample_rate: u32) -> f64 {
    2.0 * (average * 100.0) / frame_latency(frame_size, sample_rate)
}

/// Seconds of audio in one frame of `frame_size` samples.
#[inline]
pub fn frame_latency(frame_size: u32, sample_rate: u32) -> f64 {
    frame_size as f64 / sample_rate as f64
}

/// Running lowest and highest load seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadTracker {
    best: BenchResult,
    worst: BenchResult,
    observed: usize,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self {
            best: BenchResult {
                total: 0.0,
                average: 0.0,
                load: f64::INFINITY,
            },
            worst: BenchResult {
                total: 0.0,
                average: 0.0,
                load: f64::NEG_INFINITY,
            },
            observed: 0,
        }
    }

    pub fn observe(&mut self, result: BenchResult) {
        if result.load < self.best.load {
            self.best = result;
        }
        if result.load > self.worst.load {
            self.worst = result;
        }
        self.observed += 1;
    }

    /// Lowest-load result, if anything was observed.
    pub fn best(&self) -> Option<BenchResult> {
        (self.observed > 0).then_some(self.best)
    }

    /// Highest-load result, if anything was observed.
    pub fn worst(&self) -> Option<BenchResult> {
        (self.observed > 0).then_some(self.worst)
    }

    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self::new()
    }
}
