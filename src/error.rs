use std::error::Error as StdError;

use thiserror::Error;

/// Failures of a single Work Channel operation.
///
/// None of these leave the channel in a different state than before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not enough space in channel: requested {requested} bytes, {available} available")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("not enough data in channel: requested {requested} bytes, {available} available")]
    InsufficientData { requested: usize, available: usize },

    /// The payload can never be framed, either because its length does not fit
    /// the `u32` header or because it exceeds the channel capacity.
    #[error("frame of {0} bytes can never fit the channel")]
    FrameTooLarge(usize),
}

/// Errors surfaced while setting up or running a benchmark session.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    /// Plugin host construction or binding failed. The source error is kept as-is.
    #[error("plugin host error: {0}")]
    Host(#[source] Box<dyn StdError + Send + Sync>),
}

impl BenchError {
    pub fn host(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        BenchError::Host(err.into())
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
