use std::time::Instant;

/// Wall-clock interval measurement over a monotonic clock.
///
/// Copyable and allocation-free, so it can sit in the middle of a timed loop.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Capture the current instant.
    #[inline]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since [`Timer::start`].
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
