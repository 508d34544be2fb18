//! Scrape response sink.

use bytes::{Bytes, BytesMut};

use pushgate_core::error::{PushgateError, Result};
use pushgate_core::ScrapeSink;

/// Collects one scrape handoff into a response body of bounded size.
///
/// A buffer larger than `limit` is refused, so the handoff fails and the
/// buffer's retry/discard policy applies.
#[derive(Debug)]
pub struct ResponseSink {
    limit: usize,
    body: BytesMut,
}

impl ResponseSink {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            body: BytesMut::new(),
        }
    }

    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }
}

impl ScrapeSink for ResponseSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if self.body.len() + data.len() > self.limit {
            return Err(PushgateError::SinkWrite(format!(
                "{} bytes exceeds scrape limit of {}",
                data.len(),
                self.limit
            )));
        }
        self.body.extend_from_slice(data);
        Ok(())
    }
}
