//! pushgate gateway library entry.
//!
//! This crate wires config, the shared buffer, and the HTTP handlers into an
//! axum router. It is consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod ops;
pub mod router;
pub mod transport;
