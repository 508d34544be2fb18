//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use pushgate_core::error::{PushgateError, Result};

pub use schema::{GatewayConfig, GatewaySection};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PUSHGATE_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_PATH: &str = "pushgate.yaml";

/// Resolve the config for the binary.
///
/// An explicit `PUSHGATE_CONFIG` path must exist. Without it, `pushgate.yaml`
/// is used if present, otherwise built-in defaults.
pub fn load() -> Result<GatewayConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return load_from_file(&path);
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_from_file(DEFAULT_CONFIG_PATH);
    }
    tracing::info!("no config file found, using defaults");
    Ok(GatewayConfig::default())
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PushgateError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| PushgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
