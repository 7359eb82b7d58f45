//! Realtime-safe scheduling of non-realtime work.
//!
//! A plugin running on the processing thread may need work done that is not
//! allowed in a realtime callback (file IO, allocation, heavy setup). It hands
//! the work to a [`Worker`], which forwards it as a framed message to a
//! background thread. The background thread runs the [`Workee`] and may answer
//! through a [`Responder`]; answers are delivered back on the processing thread
//! by [`Worker::emit_responses`], once per processing cycle.
//!
//! ```text
//!  processing thread                      worker thread
//!  ─────────────────                      ─────────────
//!  schedule() ──► [requests channel] ──► Workee::work()
//!                                             │ respond()
//!  emit_responses() ◄── [responses channel] ◄─┘
//! ```
//!
//! The processing side never blocks: `schedule` fails when the request channel
//! is full and `emit_responses` stops at the first incomplete frame.

pub mod channel;
pub mod semaphore;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, warn};

use self::{
    channel::{channel, FrameReader, FrameWriter, HEADER_LEN},
    semaphore::Semaphore,
};
use crate::error::{BenchError, ChannelError, Result};

/// How long the worker sleeps before re-checking a request frame that is not
/// fully written yet.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Default byte capacity of each channel direction.
pub const DEFAULT_RING_SIZE: usize = 4096;

/// Non-realtime side of the work handoff. Runs on the worker thread.
pub trait Workee: Send {
    fn work(&mut self, request: &[u8], responder: &mut Responder);
}

impl<F> Workee for F
where
    F: FnMut(&[u8], &mut Responder) + Send,
{
    fn work(&mut self, request: &[u8], responder: &mut Responder) {
        self(request, responder)
    }
}

/// Receives responses on the processing thread.
pub trait WorkResponse {
    fn work_response(&mut self, response: &[u8]);
}

impl<F> WorkResponse for F
where
    F: FnMut(&[u8]),
{
    fn work_response(&mut self, response: &[u8]) {
        self(response)
    }
}

/// Handle the worker thread uses to send responses back.
pub struct Responder {
    responses: FrameWriter,
}

impl Responder {
    /// Queue a response for the processing thread.
    ///
    /// Fails when the response channel cannot take the whole frame; nothing is
    /// written in that case.
    pub fn respond(&mut self, data: &[u8]) -> std::result::Result<(), ChannelError> {
        self.responses.write_frame(data)
    }

    pub fn write_space(&self) -> usize {
        self.responses.write_space()
    }
}

struct Shared {
    wake: Semaphore,
    exit: AtomicBool,
}

/// Owns the worker thread and the processing-thread ends of both channels.
///
/// Dropping the worker signals exit, wakes the thread and joins it. Requests
/// still queued at that point are abandoned.
pub struct Worker {
    requests: FrameWriter,
    responses: FrameReader,
    response_buf: Vec<u8>,
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Start a worker thread running `workee`, with `ring_size` bytes per
    /// channel direction.
    pub fn spawn<W: Workee + 'static>(workee: W, ring_size: usize) -> Result<Self> {
        if ring_size <= HEADER_LEN {
            return Err(BenchError::InvalidConfig(format!(
                "worker ring size must exceed {HEADER_LEN} bytes, got {ring_size}"
            )));
        }

        let (requests, request_rx) = channel(ring_size);
        let (response_tx, responses) = channel(ring_size);
        let shared = Arc::new(Shared {
            wake: Semaphore::new(0),
            exit: AtomicBool::new(false),
        });

        let thread = {
            let shared = shared.clone();
            let responder = Responder {
                responses: response_tx,
            };
            thread::Builder::new()
                .name("lv2bm-worker".into())
                .spawn(move || run(workee, request_rx, responder, &shared))?
        };

        Ok(Self {
            requests,
            responses,
            response_buf: Vec::with_capacity(ring_size),
            shared,
            thread: Some(thread),
        })
    }

    pub fn ring_size(&self) -> usize {
        self.requests.capacity()
    }

    /// Queue work for the worker thread. Processing thread only.
    ///
    /// Never blocks. An `Err` means the work was dropped.
    pub fn schedule(&mut self, data: &[u8]) -> std::result::Result<(), ChannelError> {
        self.requests.write_frame(data)?;
        self.shared.wake.post();
        Ok(())
    }

    /// Deliver every complete response that was queued when the call started.
    /// Processing thread only.
    ///
    /// Stops early at an incomplete frame, which is picked up next cycle.
    /// Returns how many responses were delivered.
    pub fn emit_responses<R: WorkResponse + ?Sized>(&mut self, handler: &mut R) -> usize {
        let mut remaining = self.responses.read_space();
        let mut delivered = 0;

        while remaining >= HEADER_LEN {
            let Some(response) = self.responses.read_frame(&mut self.response_buf) else {
                break;
            };
            remaining = remaining.saturating_sub(HEADER_LEN + response.len());
            handler.work_response(response);
            delivered += 1;
        }

        delivered
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shared.exit.store(true, Ordering::Release);
        self.shared.wake.post();

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

fn run<W: Workee>(
    mut workee: W,
    mut requests: FrameReader,
    mut responder: Responder,
    shared: &Shared,
) {
    debug!("worker thread started");
    let mut request_buf = Vec::new();

    loop {
        shared.wake.wait();
        if shared.exit.load(Ordering::Acquire) {
            break;
        }

        if requests.read_space() < HEADER_LEN {
            warn!("worker woken with no work data on the request channel");
            continue;
        }

        while requests.pending_frame_len().is_none() {
            thread::sleep(POLL_INTERVAL);
            if shared.exit.load(Ordering::Acquire) {
                debug!("worker thread exiting with a partial request pending");
                return;
            }
        }

        let Some(request) = requests.read_frame(&mut request_buf) else {
            warn!("failed to read request frame");
            continue;
        };
        workee.work(request, &mut responder);
    }

    debug!("worker thread exiting");
}
