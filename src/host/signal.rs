//! Input signal contract.
//!
//! A benchmark asks its source for one frame before measuring and feeds that
//! same frame to the plugin for every processing call.

/// Produces input frames.
pub trait SignalSource {
    fn next_frame(&mut self, frame_size: usize) -> &[f32];
}

/// Every sample at the same level. Full scale (1.0) by default.
#[derive(Debug, Clone)]
pub struct ConstantSource {
    level: f32,
    buffer: Vec<f32>,
}

impl ConstantSource {
    pub fn new(level: f32) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl Default for ConstantSource {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SignalSource for ConstantSource {
    fn next_frame(&mut self, frame_size: usize) -> &[f32] {
        self.buffer.clear();
        self.buffer.resize(frame_size, self.level);
        &self.buffer
    }
}

/// Source backed by a closure that fills each frame.
pub struct FnSource<F> {
    fill: F,
    buffer: Vec<f32>,
}

impl<F> FnSource<F>
where
    F: FnMut(&mut [f32]),
{
    pub fn new(fill: F) -> Self {
        Self {
            fill,
            buffer: Vec::new(),
        }
    }
}

impl<F> SignalSource for FnSource<F>
where
    F: FnMut(&mut [f32]),
{
    fn next_frame(&mut self, frame_size: usize) -> &[f32] {
        self.buffer.resize(frame_size, 0.0);
        (self.fill)(&mut self.buffer[..]);
        &self.buffer
    }
}
