//! Push and scrape handlers.
//!
//! - `POST /push`   : validate, then append to the shared buffer (202)
//! - `GET /metrics` : drain the buffer into the response body

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use pushgate_core::error::PushgateError;
use pushgate_core::ScrapeOutcome;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::transport::sink::ResponseSink;

/// Content type of a non-empty scrape response.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub async fn push(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body.map_err(|rej| {
        tracing::warn!(status = %rej.status(), "push body unreadable");
        if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
            PushgateError::PayloadTooLarge
        } else {
            PushgateError::BadRequest(format!("bad body: {}", rej.body_text()))
        }
    })?;

    let accepted = app.buffer().submit(&body).map_err(|e| {
        tracing::warn!(reason = %e, bytes = body.len(), "push rejected");
        e
    })?;

    tracing::debug!(bytes = accepted.bytes, buffered = accepted.buffered, "push accepted");
    Ok(StatusCode::ACCEPTED)
}

pub async fn metrics(State(app): State<AppState>) -> Response {
    let mut sink = ResponseSink::new(app.cfg().gateway.max_scrape_bytes);

    match app.buffer().scrape(&mut sink) {
        ScrapeOutcome::Empty => StatusCode::OK.into_response(),
        ScrapeOutcome::Delivered { bytes } => {
            tracing::debug!(bytes, "scrape delivered");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
                sink.into_body(),
            )
                .into_response()
        }
        // Already logged by the buffer; the scraper only sees an empty 503.
        ScrapeOutcome::Retained { .. } | ScrapeOutcome::Discarded { .. } => {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
