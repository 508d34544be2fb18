//! Shared sample buffer with drain-on-scrape semantics.
//!
//! The buffer and the consecutive-failure counter live behind one mutex and
//! always change together. A scrape hands the whole buffer to a sink while
//! holding the lock; a failed handoff keeps the data for the next scrape until
//! [`MAX_RETRY`] consecutive failures, at which point the data is dropped so a
//! stuck consumer cannot grow memory without bound.
//!
//! The lock is a blocking `std::sync::Mutex`: critical sections are a single
//! append or a single synchronous sink write and never cross an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::{Bytes, BytesMut};

use crate::error::{PushgateError, Result};
use crate::exposition;

/// Consecutive failed scrapes tolerated before the buffer is discarded.
pub const MAX_RETRY: u32 = 3;

/// Destination for one scrape handoff.
///
/// `write_all` receives the entire buffer in one call and must return
/// promptly. Any error counts as a failed scrape.
pub trait ScrapeSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

impl ScrapeSink for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Result of a successful push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// Bytes appended by this push.
    pub bytes: usize,
    /// Total bytes buffered after the append.
    pub buffered: usize,
}

/// What a single scrape did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// Nothing buffered; sink untouched, counter untouched.
    Empty,
    /// Sink accepted the buffer; buffer cleared and counter reset.
    Delivered { bytes: usize },
    /// Sink failed; data kept for the next scrape.
    Retained { failures: u32 },
    /// Sink failed for the `MAX_RETRY`-th time in a row; data dropped.
    Discarded { bytes: usize },
}

/// Next state after one handoff attempt on a non-empty buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Drain,
    Retain { failures: u32 },
    Discard,
}

/// Pure transition: `(failures so far, handoff succeeded)` -> next state.
fn transition(failures: u32, delivered: bool) -> Transition {
    if delivered {
        return Transition::Drain;
    }
    let failures = failures + 1;
    if failures >= MAX_RETRY {
        Transition::Discard
    } else {
        Transition::Retain { failures }
    }
}

#[derive(Debug, Default)]
struct BufferState {
    data: BytesMut,
    failures: u32,
}

/// Owner of the accumulated push payloads.
#[derive(Debug, Default)]
pub struct BufferManager {
    state: Mutex<BufferState>,
}

impl BufferManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the state consistent, so a poisoned lock
    // is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate `payload` and append it. Rejection leaves the state untouched.
    pub fn submit(&self, payload: &[u8]) -> Result<Accepted> {
        exposition::check(payload).map_err(|v| PushgateError::BadRequest(v.to_string()))?;
        Ok(self.push(payload))
    }

    /// Append an already validated payload.
    pub fn push(&self, payload: &[u8]) -> Accepted {
        let mut st = self.lock();
        st.data.extend_from_slice(payload);
        Accepted {
            bytes: payload.len(),
            buffered: st.data.len(),
        }
    }

    /// Hand the whole buffer to `sink` and apply the retry/discard policy.
    ///
    /// Scraping an empty buffer is a no-op and does not affect the failure
    /// counter.
    pub fn scrape<S>(&self, sink: &mut S) -> ScrapeOutcome
    where
        S: ScrapeSink + ?Sized,
    {
        let mut st = self.lock();
        if st.data.is_empty() {
            return ScrapeOutcome::Empty;
        }

        let bytes = st.data.len();
        let handoff = sink.write_all(&st.data);
        if let Err(e) = &handoff {
            tracing::warn!(error = %e, bytes, failures = st.failures + 1, "scrape handoff failed");
        }

        match transition(st.failures, handoff.is_ok()) {
            Transition::Drain => {
                st.data.clear();
                st.failures = 0;
                ScrapeOutcome::Delivered { bytes }
            }
            Transition::Retain { failures } => {
                st.failures = failures;
                ScrapeOutcome::Retained { failures }
            }
            Transition::Discard => {
                tracing::warn!(bytes, failures = MAX_RETRY, "dropping buffer after consecutive failed scrapes");
                st.data.clear();
                st.failures = 0;
                ScrapeOutcome::Discarded { bytes }
            }
        }
    }

    /// Bytes currently buffered.
    pub fn len(&self) -> usize {
        self.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().data.is_empty()
    }

    /// Consecutive failed scrapes since the last success or discard.
    pub fn failures(&self) -> u32 {
        self.lock().failures
    }

    /// Copy of the buffered bytes, without draining.
    pub fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.lock().data)
    }
}
