pub mod bench; // Preset runs, parameter sweep, load statistics
pub mod config;
pub mod error;
pub mod host; // Plugin host and signal source contracts
pub mod timer;
pub mod worker; // Realtime-safe non-realtime work scheduling

pub use bench::{result::BenchResult, Bench, BenchState, Report};
pub use config::BenchConfig;
pub use error::{BenchError, ChannelError};
pub use host::{signal::SignalSource, urid::UridMap, AxisKind, ControlAxis, PluginHost, Preset};
pub use worker::{Responder, WorkResponse, Workee, Worker};
