use std::net::SocketAddr;

use serde::Deserialize;
use pushgate_core::error::{PushgateError, Result};

const MIN_PUSH_BYTES: usize = 1024;
const MAX_PUSH_BYTES: usize = 256 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PushgateError::UnsupportedVersion);
        }

        self.gateway.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Largest accepted push body.
    #[serde(default = "default_max_push_bytes")]
    pub max_push_bytes: usize,

    /// Largest buffer a single scrape response will carry. A bigger buffer
    /// fails the handoff and is eventually discarded.
    #[serde(default = "default_max_scrape_bytes")]
    pub max_scrape_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_push_bytes: default_max_push_bytes(),
            max_scrape_bytes: default_max_scrape_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(MIN_PUSH_BYTES..=MAX_PUSH_BYTES).contains(&self.max_push_bytes) {
            return Err(PushgateError::BadRequest(format!(
                "gateway.max_push_bytes must be between {MIN_PUSH_BYTES} and {MAX_PUSH_BYTES}"
            )));
        }
        if self.max_scrape_bytes < self.max_push_bytes {
            return Err(PushgateError::BadRequest(
                "gateway.max_scrape_bytes must be at least max_push_bytes".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PushgateError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9091".into()
}
fn default_max_push_bytes() -> usize {
    4 * 1024 * 1024
}
fn default_max_scrape_bytes() -> usize {
    64 * 1024 * 1024
}
