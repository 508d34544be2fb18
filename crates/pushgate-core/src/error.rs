//! Shared error type across pushgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed exposition payload.
    BadRequest,
    /// Payload too large.
    PayloadTooLarge,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PushgateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PushgateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("sink write failed: {0}")]
    SinkWrite(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PushgateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PushgateError::BadRequest(_) => ClientCode::BadRequest,
            PushgateError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            PushgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            // Scrape failures are answered with a bare 503, never an error body.
            PushgateError::SinkWrite(_) => ClientCode::Internal,
            PushgateError::Internal(_) => ClientCode::Internal,
        }
    }

    /// True for errors caused by the caller's input (4xx class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PushgateError::BadRequest(_) | PushgateError::PayloadTooLarge
        )
    }
}
