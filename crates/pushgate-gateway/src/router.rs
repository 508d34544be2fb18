//! Axum router wiring.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_push_bytes = state.cfg().gateway.max_push_bytes;
    Router::new()
        .route("/push", post(transport::http::push))
        .route("/metrics", get(transport::http::metrics))
        .route("/healthz", get(ops::healthz))
        .layer(DefaultBodyLimit::max(max_push_bytes))
        .with_state(state)
}
