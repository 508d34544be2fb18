//! Shared application state for the pushgate gateway.
//!
//! The sample buffer is owned here and handed to handlers through axum's
//! `State` extractor; there is no process-global buffer.

use std::sync::Arc;

use pushgate_core::BufferManager;

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    buffer: Arc<BufferManager>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self::with_buffer(cfg, Arc::new(BufferManager::new()))
    }

    /// Build state around an existing buffer (shared with tests or an embedder).
    pub fn with_buffer(cfg: GatewayConfig, buffer: Arc<BufferManager>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            buffer,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn buffer(&self) -> &BufferManager {
        &self.buffer
    }
}
