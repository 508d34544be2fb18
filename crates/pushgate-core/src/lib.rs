//! pushgate core: exposition validation, the shared sample buffer, and error types.
//!
//! This crate holds the state machine of the gateway and carries no transport
//! or runtime dependencies, so the buffer lifecycle can be driven directly by
//! tests or embedded behind any front end.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PushgateError`/`Result` so the process
//! keeps serving on malformed input or a failing scraper.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod buffer;
pub mod error;
pub mod exposition;

/// Shared result type.
pub use error::{Result, PushgateError};

pub use buffer::{Accepted, BufferManager, ScrapeOutcome, ScrapeSink, MAX_RETRY};
