//! Counting wake-up signal for the worker thread.
//!
//! Permits live in an atomic counter. `post` is a `fetch_add` plus an unpark
//! of the waiting thread, so the posting side never takes a lock the waiter
//! could be holding.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        OnceLock,
    },
    thread::{self, Thread},
};

/// A counting semaphore with a single waiting thread: every `post` lets
/// exactly one `wait` through.
///
/// The first thread to call `wait` becomes the waiter. Any thread may `post`.
#[derive(Debug, Default)]
pub struct Semaphore {
    permits: AtomicUsize,
    waiter: OnceLock<Thread>,
}

impl Semaphore {
    pub fn new(initial: usize) -> Self {
        Self {
            permits: AtomicUsize::new(initial),
            waiter: OnceLock::new(),
        }
    }

    /// Add one permit and wake the waiter. Never blocks.
    pub fn post(&self) {
        self.permits.fetch_add(1, Ordering::Release);
        if let Some(waiter) = self.waiter.get() {
            waiter.unpark();
        }
    }

    /// Block until a permit is available, then take it.
    pub fn wait(&self) {
        let waiter = self.waiter.get_or_init(thread::current);
        debug_assert_eq!(waiter.id(), thread::current().id(), "second waiter");

        let mut permits = self.permits.load(Ordering::Acquire);
        loop {
            if permits == 0 {
                // A post between the load and here leaves an unpark token, so
                // this returns at once
                thread::park();
                permits = self.permits.load(Ordering::Acquire);
                continue;
            }

            match self.permits.compare_exchange_weak(
                permits,
                permits - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(actual) => permits = actual,
            }
        }
    }
}
